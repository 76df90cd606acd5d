use crate::theme::PRESET_NAMES;
use crate::Arguments;
use clap::{
    arg, builder::PossibleValuesParser, crate_authors, crate_description, crate_name,
    crate_version, value_parser, Arg, ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;

const DEFAULT_THEMES: [&str; 3] = ["nostalgia", "sepia", "night"];

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_file_argument(command);
        let command = Self::register_output_directory_argument(command);
        let command = Self::register_themes_argument(command);
        Self::register_mask_argument(command)
    }

    fn register_input_file_argument(command: Command) -> Command {
        command.arg(Self::create_input_file_argument())
    }

    fn register_output_directory_argument(command: Command) -> Command {
        command.arg(Self::create_output_directory_argument())
    }

    fn register_themes_argument(command: Command) -> Command {
        command.arg(Self::create_themes_argument())
    }

    fn register_mask_argument(command: Command) -> Command {
        command.arg(Self::create_mask_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_file_argument() -> Arg {
        Arg::new("input_file")
            .help("Path to PPM input file")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_output_directory_argument() -> Arg {
        arg!(output_directory: -o --output_directory <DIR> "Directory the themed images are written to")
            .default_value(".")
            .value_parser(value_parser!(PathBuf))
    }

    fn create_themes_argument() -> Arg {
        arg!(themes: -t --theme <THEME> "Theme to render, may be given multiple times")
            .action(ArgAction::Append)
            .default_values(DEFAULT_THEMES)
            .value_parser(PossibleValuesParser::new(PRESET_NAMES))
    }

    fn create_mask_argument() -> Arg {
        arg!(mask: -m --mask "Also write the untinted luminance mask as PGM")
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_file: Self::extract_input_file_argument(matches),
            output_directory: Self::extract_output_directory_argument(matches),
            themes: Self::extract_themes_argument(matches),
            write_mask: Self::extract_mask_argument(matches),
        }
    }

    fn extract_input_file_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("input_file")
            .expect("Required argument input_file not provided")
            .clone()
    }

    fn extract_output_directory_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_directory")
            .expect("Output directory must be provided, but was unset.")
            .clone()
    }

    fn extract_themes_argument(matches: &ArgMatches) -> Vec<String> {
        matches
            .get_many::<String>("themes")
            .expect("Themes must be provided, but were unset.")
            .cloned()
            .collect()
    }

    fn extract_mask_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("mask")
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use clap::{error::ErrorKind, Command};

    use super::CLIParser;

    const PROGRAM_NAME_ARGUMENT: &str = "test_program_name";

    #[test]
    fn parse_input_file_argument() {
        let input_file_name = "testfile.ppm";
        let command = Command::new("test");
        let command = CLIParser::register_input_file_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, input_file_name]);
        let input_file = CLIParser::extract_input_file_argument(&matches);
        assert_eq!(input_file.file_name().unwrap(), input_file_name);
    }

    #[test]
    fn parse_output_directory_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_output_directory_argument(command);
        let matches =
            command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-o", "/tmp/rendered"]);
        let output_directory = CLIParser::extract_output_directory_argument(&matches);
        assert_eq!(output_directory.file_name().unwrap(), "rendered");
    }

    #[test]
    fn parse_repeated_theme_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_themes_argument(command);
        let matches = command.get_matches_from(vec![
            PROGRAM_NAME_ARGUMENT,
            "--theme",
            "modern",
            "-t",
            "sepia",
        ]);
        let themes = CLIParser::extract_themes_argument(&matches);
        assert_eq!(themes, vec!["modern", "sepia"]);
    }

    #[test]
    fn parse_unknown_theme_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_themes_argument(command);
        let result = command.try_get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "-t", "vapor"]);
        if let Err(error) = result {
            assert_eq!(error.kind(), ErrorKind::InvalidValue);
        } else {
            panic!("Illegal value for theme not detected");
        }
    }

    #[test]
    fn parse_mask_argument() {
        let command = Command::new("test");
        let command = CLIParser::register_mask_argument(command);
        let matches = command.get_matches_from(vec![PROGRAM_NAME_ARGUMENT, "--mask"]);
        assert!(CLIParser::extract_mask_argument(&matches));
    }

    #[test]
    fn parse_required_arguments_only() {
        let input_file_name = "inputfile.ppm";
        let input_file_path = format!("/input_directory/{}", input_file_name);
        let mut cli_parser = CLIParser::default();
        let arguments = cli_parser.parse(vec![PROGRAM_NAME_ARGUMENT, &input_file_path]);
        assert_eq!(
            arguments.input_file.file_name().unwrap(),
            input_file_name,
            "input file does not match"
        );
        assert_eq!(
            arguments.output_directory.to_str().unwrap(),
            ".",
            "output directory does not match"
        );
        assert_eq!(
            arguments.themes,
            vec!["nostalgia", "sepia", "night"],
            "themes do not match"
        );
        assert!(!arguments.write_mask, "mask should be off by default");
    }
}
