use std::fmt::Write;

use chrysalis_lib::Colors;
use chrysalis_lib::qr::{self, BitmapMatrix, EccLevel, Target};
use serde::Serialize;

pub struct QrArgs {
    pub text: String,
    pub ecc: String,
    pub target: Option<String>,
    pub json: bool,
    pub color: bool,
}

/// Metrics for one bitmap, as printed by `--json`.
#[derive(Debug, Serialize)]
pub struct QrReport {
    pub version: u8,
    pub side: usize,
    pub ecc: String,
    pub density: f64,
    pub noise: f64,
    pub hash: String,
    pub target: String,
    pub accepted: bool,
    pub verdict: String,
}

pub fn run(args: QrArgs) {
    let (matrix, report) = build_report(&args.text, &args.ecc, args.target.as_deref())
        .unwrap_or_else(|msg| {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        });

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    print!("{}", matrix.render());
    print!("{}", format_report(&report, Colors::new(args.color)));
}

/// Build the bitmap for `text` and measure it against `target`.
pub fn build_report(
    text: &str,
    ecc: &str,
    target: Option<&str>,
) -> Result<(BitmapMatrix, QrReport), String> {
    let ecc: EccLevel = ecc.parse().map_err(|e: qr::QrError| e.to_string())?;
    let target = match target {
        Some(hex) => Target::from_hex(hex).map_err(|e| e.to_string())?,
        None => Target::MAX,
    };
    let matrix = BitmapMatrix::build(text.as_bytes(), ecc).map_err(|e| e.to_string())?;
    let verdict = qr::validate(&matrix, &target);

    let report = QrReport {
        version: matrix.version(),
        side: matrix.side(),
        ecc: matrix.ecc().to_string(),
        density: matrix.density(),
        noise: matrix.noise(),
        hash: hex::encode(qr::matrix_hash(&matrix)),
        target: target.to_hex(),
        accepted: verdict.is_accepted(),
        verdict: verdict.to_string(),
    };
    Ok((matrix, report))
}

/// Plain-text summary printed under the rendered bitmap.
pub fn format_report(report: &QrReport, colors: Colors) -> String {
    let mut out = String::new();
    let verdict_color = if report.accepted {
        colors.green
    } else {
        colors.red
    };

    writeln!(
        out,
        "{}version{} {}  {}side{} {}  {}ecc{} {}",
        colors.dim,
        colors.reset,
        report.version,
        colors.dim,
        colors.reset,
        report.side,
        colors.dim,
        colors.reset,
        report.ecc
    )
    .unwrap();
    writeln!(
        out,
        "{}density{} {:.4}  {}noise{} {:.4}",
        colors.dim, colors.reset, report.density, colors.dim, colors.reset, report.noise
    )
    .unwrap();
    writeln!(out, "{}hash{} {}", colors.dim, colors.reset, report.hash).unwrap();
    writeln!(
        out,
        "{}verdict{} {}{}{}",
        colors.dim, colors.reset, verdict_color, report.verdict, colors.reset
    )
    .unwrap();

    out
}
