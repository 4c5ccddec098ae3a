//! Test utilities for CFG parser testing
//!
//! This module provides sample CFG files and builders used across the
//! parser test modules.

use std::io::Write;
use tempfile::NamedTempFile;

mod locator_tests;

/// Complete 2013 file: 1 analog, 1 status, one rate, empty time multiplier
pub fn create_2013_cfg() -> String {
    r#"Substation North,Recorder 12,2013
2,1A,1D
1,IA,A,Feeder 3,A,0.05,0,0,-32767,32767,600,1,S
1,CB52 Trip,,Feeder 3,0
50
1
4800,9600
15/03/2021,08:30:00.000000
15/03/2021,08:30:00.250000
BINARY

-5h30,-5h30
F,0"#
        .to_string()
}

/// Complete 1991 file using the short channel forms and two rates
pub fn create_1991_cfg() -> String {
    r#"Old Station,Legacy DFR
4,2A,2D
1,VA,A,Bus 1,kV,0.1,0,0,-2048,2047
2,VB,B,Bus 1,kV,0.1,0,0,-2048,2047
1,52A,0
2,52B,1
60
2
1920,500
960,1000
03/04/1999,23:59:59.999
03/04/1999,23:59:59.999
ASCII"#
        .to_string()
}

/// Build a synthetic CFG file with the given channel and rate counts
pub fn build_cfg(revision: &str, analog: usize, status: usize, rates: usize) -> String {
    let mut lines = vec![
        format!("Synthetic,Builder,{}", revision),
        format!("{},{}A,{}D", analog + status, analog, status),
    ];

    for n in 1..=analog {
        lines.push(format!(
            "{n},CH{n},A,Line,V,0.5,0.0,0,-32767,32767,1000,1,P"
        ));
    }
    for n in 1..=status {
        lines.push(format!("{n},ST{n},,Breaker,0"));
    }

    lines.push("60".to_string());
    lines.push(rates.to_string());
    for n in 1..=rates {
        lines.push(format!("{},{}", 1000 * n, 100 * n));
    }

    lines.push("01/02/2020,00:00:00.000".to_string());
    lines.push("01/02/2020,00:00:01.000".to_string());
    lines.push("BINARY32".to_string());
    lines.push("1.0".to_string());
    if revision == "2013" {
        lines.push("0,0".to_string());
        lines.push("0,0".to_string());
    }

    lines.join("\n")
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file, "{}", content).unwrap();
    temp_file
}
