use std::{
    hint::black_box,
    time::{Duration, Instant},
};

const WARMUP: Duration = Duration::from_millis(200);
const MEASURE: Duration = Duration::from_secs(1);

fn generate(count: usize) -> String {
    (0..count)
        .map(|i| format!("foo{}=foo", i))
        .collect::<Vec<_>>()
        .join(";")
}

fn run(label: &str, header: &str) {
    let until = Instant::now() + WARMUP;
    while Instant::now() < until {
        black_box(crumb::parse(black_box(header)).unwrap());
    }

    let mut iterations: u64 = 0;
    let start = Instant::now();
    while start.elapsed() < MEASURE {
        for _ in 0..1000 {
            black_box(crumb::parse(black_box(header)).unwrap());
        }
        iterations += 1000;
    }

    let elapsed = start.elapsed().as_secs_f64();
    println!(
        "{:<40} {:>14.0} ops/sec {:>10.1} ns/op",
        label,
        iterations as f64 / elapsed,
        elapsed * 1e9 / iterations as f64
    );
}

// cargo run --release
fn main() {
    let duplicates = format!("{}; {}", generate(2), generate(2));
    let ten = generate(10);
    let hundred = generate(100);

    run("parse(\"foo=bar\")", "foo=bar");
    run("parse(\"foo=hello%20there!\")", "foo=hello%20there!");
    run(&format!("parse(\"{}\")", duplicates), &duplicates);
    run("parse(10 cookies)", &ten);
    run("parse(100 cookies)", &hundred);

    let signer = crumb::Signer::new("secretKey");
    let signed = signer.sign("mificot");
    let start = Instant::now();
    let mut iterations: u64 = 0;
    while start.elapsed() < MEASURE {
        for _ in 0..1000 {
            black_box(signer.unsign(black_box(&signed)).unwrap());
        }
        iterations += 1000;
    }
    println!(
        "{:<40} {:>14.0} ops/sec",
        "unsign(\"mificot.<digest>\")",
        iterations as f64 / start.elapsed().as_secs_f64()
    );
}
