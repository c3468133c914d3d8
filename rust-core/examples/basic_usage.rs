/// Basic usage example: feed accelerometer samples, react to shakes
use std::cell::Cell;

use shake_sensing::{AccelerationSample, ShakeDetector, ShakeFilter};

fn main() {
    println!("=== Shake Sensing: Basic Example ===\n");

    // Simulated 50Hz stream: resting, one vigorous shake, a jolt too soon
    // after it, then a second shake.
    let samples: Vec<(u64, [f32; 3])> = vec![
        (1000, [9.8, 9.8, 9.8]),
        (1020, [9.9, 9.7, 9.8]),
        (1040, [31.0, 12.0, 9.8]), // shake
        (1060, [28.0, 9.0, 9.8]),  // still shaking, debounced
        (1500, [30.0, 9.8, 9.8]),  // debounced
        (2060, [30.0, 9.8, 9.8]),  // shake
        (2080, [9.8, 9.8, 9.8]),
    ];

    let now = Cell::new(0u64);
    let answers = ["Yes", "No", "Ask again later"];
    let shown = Cell::new(0usize);

    let mut detector = ShakeDetector::new(|| {
        // A real host would pick an answer at random and render it.
        let answer = answers[shown.get() % answers.len()];
        shown.set(shown.get() + 1);
        println!("  [{} ms] shake -> {}", now.get(), answer);
    });

    println!("Processing {} samples...\n", samples.len());
    for (timestamp, [x, y, z]) in samples {
        now.set(timestamp);
        detector.on_sample(x, y, z, timestamp);
    }

    let filter: &ShakeFilter = detector.filter();
    println!("\n=== Summary ===");
    println!("Shakes accepted: {}", filter.accepted_count());
    println!("Last shake at: {} ms", filter.last_shake_ms());
    println!(
        "Resting force: {:.2} m/s²",
        filter.net_force(&AccelerationSample::new(9.8, 9.8, 9.8))
    );
}
