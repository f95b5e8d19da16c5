//! CLI tool for gridview - resolves a grid viewport and outputs JSON
//!
//! Usage:
//!   gridview_cli                                          # Default demo grid
//!   gridview_cli --columns 40 --rows 500 --scroll 120,340
//!   gridview_cli --frozen 1x2 --span 1,0,2x2 -o out.json

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use gridview::{
    resolve, CircularScrolling, GridLayout, GridSource, GridSpec, Point, Size, SpanRect, Viewport,
};

const USAGE: &str = "Usage: gridview_cli [options]
  --columns <n>        column count (default 26)
  --rows <n>           row count (default 100)
  --cell <WxH>         cell size (default 96x28)
  --frozen <CxR>       frozen columns x rows (default 0x0)
  --viewport <WxH>     viewport size (default 800x600)
  --scroll <X,Y>       scroll offset (default 0,0)
  --circular <x|y|xy>  wrap-around axes
  --span <C,R,WxH>     merged span, repeatable
  -o <path>            write JSON to a file instead of stdout";

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut columns: u32 = 26;
    let mut rows: u32 = 100;
    let mut cell = (96.0_f32, 28.0_f32);
    let mut frozen = (0_u32, 0_u32);
    let mut viewport_size = (800.0_f32, 600.0_f32);
    let mut scroll = (0.0_f32, 0.0_f32);
    let mut circular = CircularScrolling::NONE;
    let mut spans: Vec<SpanRect> = Vec::new();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--columns" => columns = parse_value(&args, i, parse_u32),
            "--rows" => rows = parse_value(&args, i, parse_u32),
            "--cell" => cell = parse_value(&args, i, |v| parse_f32_pair(v, 'x')),
            "--frozen" => frozen = parse_value(&args, i, |v| parse_u32_pair(v, 'x')),
            "--viewport" => viewport_size = parse_value(&args, i, |v| parse_f32_pair(v, 'x')),
            "--scroll" => scroll = parse_value(&args, i, |v| parse_f32_pair(v, ',')),
            "--circular" => circular = parse_value(&args, i, parse_circular),
            "--span" => spans.push(parse_value(&args, i, parse_span)),
            "-o" => output_path = Some(parse_value(&args, i, |v| Some(v.to_string()))),
            "--help" | "-h" => {
                eprintln!("{USAGE}");
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("{USAGE}");
                std::process::exit(1);
            }
        }
        i += 2;
    }

    let mut source = GridSource::uniform(columns, rows, cell.0, cell.1)
        .with_frozen(frozen.0, frozen.1)
        .with_circular(circular);
    if !spans.is_empty() {
        source = source.with_spans(spans);
    }

    // Build and resolve
    let spec = match GridSpec::build(&source) {
        Ok(spec) => spec,
        Err(e) => {
            eprintln!("Error building grid: {e}");
            std::process::exit(1);
        }
    };
    let layout = match GridLayout::new(&spec) {
        Ok(layout) => layout,
        Err(e) => {
            eprintln!("Error building grid: {e}");
            std::process::exit(1);
        }
    };

    let mut viewport = Viewport::with_frame(Size::new(viewport_size.0, viewport_size.1));
    viewport.set_scroll(Point::new(scroll.0, scroll.1), &layout);

    let pass = resolve(&layout, &viewport);
    eprintln!(
        "Resolved {} entries and {} grid lines at scroll ({}, {})",
        pass.entries.len(),
        pass.lines.len(),
        viewport.scroll.x,
        viewport.scroll.y
    );

    // Serialize to JSON
    let json = match serde_json::to_string_pretty(&pass) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error serializing JSON: {e}");
            std::process::exit(1);
        }
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                eprintln!("Error writing {path}: {e}");
                std::process::exit(1);
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}

fn parse_value<T>(args: &[String], index: usize, parse: impl Fn(&str) -> Option<T>) -> T {
    let flag = &args[index];
    let Some(value) = args.get(index + 1) else {
        eprintln!("Missing value for {flag}");
        std::process::exit(1);
    };
    match parse(value) {
        Some(parsed) => parsed,
        None => {
            eprintln!("Invalid value for {flag}: {value}");
            std::process::exit(1);
        }
    }
}

fn parse_u32(value: &str) -> Option<u32> {
    value.trim().parse().ok()
}

fn parse_f32_pair(value: &str, sep: char) -> Option<(f32, f32)> {
    let (a, b) = value.split_once(sep)?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn parse_u32_pair(value: &str, sep: char) -> Option<(u32, u32)> {
    let (a, b) = value.split_once(sep)?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

fn parse_circular(value: &str) -> Option<CircularScrolling> {
    match value {
        "x" => Some(CircularScrolling::HORIZONTAL),
        "y" => Some(CircularScrolling::VERTICAL),
        "xy" | "yx" => Some(CircularScrolling::BOTH),
        _ => None,
    }
}

fn parse_span(value: &str) -> Option<SpanRect> {
    let mut parts = value.splitn(3, ',');
    let column = parts.next()?.trim().parse().ok()?;
    let row = parts.next()?.trim().parse().ok()?;
    let (column_count, row_count) = parse_u32_pair(parts.next()?, 'x')?;
    Some(SpanRect::new(column, row, column_count, row_count))
}
