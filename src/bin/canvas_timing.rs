use std::time::{Duration, Instant};

use paper::{GrayColorFormat, SparseCanvas, Theme};

const CANVAS_WIDTH: u32 = 1920;
const CANVAS_HEIGHT: u32 = 1080;
const NUMBER_OF_ROUNDS: u32 = 10;

fn fill_row_major(canvas: &mut SparseCanvas) {
    for y in 0..CANVAS_HEIGHT as i32 {
        for x in 0..CANVAS_WIDTH as i32 {
            let luma = ((x + y * 8) % 256) as u8;
            canvas.set(x, y, &GrayColorFormat { luma });
        }
    }
}

/// Visits every pixel once, in an order that jumps across bands and tiles.
fn fill_scattered(canvas: &mut SparseCanvas) {
    let area = CANVAS_WIDTH as u64 * CANVAS_HEIGHT as u64;
    // co-prime with the area, so the walk is a permutation
    let stride = 7_919_u64;
    let mut index = 0_u64;
    for _ in 0..area {
        index = (index + stride) % area;
        let x = (index % CANVAS_WIDTH as u64) as i32;
        let y = (index / CANVAS_WIDTH as u64) as i32;
        canvas.set(x, y, &GrayColorFormat { luma: x as u8 });
    }
}

fn read_all(canvas: &SparseCanvas) -> u64 {
    let bounds = canvas.bounds();
    bounds
        .points()
        .map(|point| canvas.at(point.x, point.y).red as u64)
        .sum()
}

fn calculate_std_deviation_in_micros(mean: &Duration, measurements: &[Duration]) -> u64 {
    let mean_micros = mean.as_micros() as i128;
    let sum = measurements
        .iter()
        .map(|m| m.as_micros() as i128 - mean_micros)
        .map(|v| v.pow(2).unsigned_abs())
        .sum::<u128>();
    let variance = sum / measurements.len() as u128;
    (variance as f64).sqrt().round() as u64
}

fn measure(name: &str, mut round: impl FnMut() -> u64) {
    println!("Starting {}", name);
    let mut durations: Vec<Duration> = Vec::new();
    for round_number in 1..=NUMBER_OF_ROUNDS {
        let start = Instant::now();
        let checksum = round();
        let duration = start.elapsed();
        println!(
            "Finished round {} after {} microseconds (checksum {})",
            round_number,
            duration.as_micros(),
            checksum
        );
        durations.push(duration);
    }

    let min_duration = durations.iter().min().copied().unwrap_or_default();
    let max_duration = durations.iter().max().copied().unwrap_or_default();
    let avg_duration = durations.iter().sum::<Duration>() / NUMBER_OF_ROUNDS;
    let std_deviation = calculate_std_deviation_in_micros(&avg_duration, &durations);

    println!(
        "{}: Min: {}, Max: {}, Average: {}, Std Deviation: {}",
        name,
        min_duration.as_micros(),
        max_duration.as_micros(),
        avg_duration.as_micros(),
        std_deviation,
    );
}

fn main() {
    measure("row-major writes", || {
        let mut canvas = SparseCanvas::new(Theme::SEPIA, CANVAS_WIDTH, CANVAS_HEIGHT);
        fill_row_major(&mut canvas);
        canvas.tile_count() as u64
    });
    measure("scattered writes", || {
        let mut canvas = SparseCanvas::new(Theme::SEPIA, CANVAS_WIDTH, CANVAS_HEIGHT);
        fill_scattered(&mut canvas);
        canvas.tile_count() as u64
    });

    let mut canvas = SparseCanvas::new(Theme::SEPIA, CANVAS_WIDTH, CANVAS_HEIGHT);
    fill_row_major(&mut canvas);
    measure("themed reads", || read_all(&canvas));
}
