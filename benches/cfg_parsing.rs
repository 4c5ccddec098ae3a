// benches/cfg_parsing.rs
use comtrade_cfg::CfgParser;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

/// Build a 2013 CFG with the given channel counts and rate segments
fn synthetic_cfg(analog: usize, status: usize, rates: usize) -> String {
    let mut lines = vec![
        "Bench Substation,Bench Recorder,2013".to_string(),
        format!("{},{}A,{}D", analog + status, analog, status),
    ];
    for n in 1..=analog {
        lines.push(format!(
            "{n},Analog {n},A,Feeder {n},kV,0.000123,-0.5,0,-32767,32767,132000,110,S"
        ));
    }
    for n in 1..=status {
        lines.push(format!("{n},Status {n},,Breaker {n},0"));
    }
    lines.push("50".to_string());
    lines.push(rates.to_string());
    for n in 1..=rates {
        lines.push(format!("{},{}", 1000 * n, 2000 * n));
    }
    lines.push("15/03/2021,08:30:00.000000".to_string());
    lines.push("15/03/2021,08:30:00.125000".to_string());
    lines.push("BINARY".to_string());
    lines.push(String::new());
    lines.push("+0,+0".to_string());
    lines.push("0,0".to_string());
    lines.join("\n")
}

fn benchmark_small_cfg(c: &mut Criterion) {
    let content = synthetic_cfg(8, 16, 1);
    let parser = CfgParser::default();

    c.bench_function("parse_cfg_24_channels", |b| {
        b.iter(|| parser.parse_str(black_box(&content)).unwrap());
    });
}

fn benchmark_large_cfg(c: &mut Criterion) {
    let content = synthetic_cfg(512, 2048, 16);
    let parser = CfgParser::default();

    c.bench_function("parse_cfg_2560_channels", |b| {
        b.iter(|| parser.parse_str(black_box(&content)).unwrap());
    });
}

criterion_group!(benches, benchmark_small_cfg, benchmark_large_cfg);
criterion_main!(benches);
