use std::env::args_os;
use std::process::ExitCode;

use paper::{render_themes, CLIParser};

fn main() -> ExitCode {
    let mut cli_parser = CLIParser::default();
    let arguments = cli_parser.parse(args_os());
    match render_themes(&arguments) {
        Ok(written) => {
            for file_path in written {
                println!("Wrote {}", file_path.display());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Rendering failed because of: {}", e);
            ExitCode::FAILURE
        }
    }
}
