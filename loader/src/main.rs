use std::{env, fs};
use std::error::Error;
use std::ffi::OsStr;
use bstr::ByteSlice;
use tracing::info;
use tracing_subscriber::EnvFilter;

use atlas::{Atlas, Placement};

const DEFAULT_MAX_SIZE: u32 = 4096;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut max_size = DEFAULT_MAX_SIZE;
    let mut initial = (1, 1);
    let mut sizes = Vec::default();

    let mut args = env::args_os();
    args.next();
    while let Some(arg) = args.next() {
        if arg == OsStr::new("--max") {
            let max = args.next().ok_or("expected maximum atlas size")?;
            max_size = max.to_str().ok_or("invalid maximum atlas size")?.parse()?;
        } else if arg == OsStr::new("--initial") {
            let size = args.next().ok_or("expected initial size (WxH)")?;
            initial = parse_size(size.as_encoded_bytes())?;
        } else if arg == OsStr::new("--file") {
            let path = args.next().ok_or("expected rectangle list")?;
            sizes.extend(read_sizes(&fs::read(path)?)?);
        } else {
            sizes.push(parse_size(arg.as_encoded_bytes())?);
        }
    }
    if sizes.is_empty() {
        Err("expected rectangles (WxH) or --file")?;
    }

    let mut atlas = Atlas::new(max_size)?;
    let (width, height) = initial;
    if width == 0 || height == 0 || width > max_size || height > max_size {
        Err(format!("initial size {}x{} must lie within 1..={}", width, height, max_size))?;
    }
    atlas.reset(width, height);

    let mut placed = 0;
    let mut area = 0;
    for &(width, height) in &sizes {
        let size = atlas.draw_size();
        match atlas.add_rect(width, height) {
            Ok(Placement { x, y }) => {
                println!("{}x{} {} {}", width, height, x, y);
                placed += 1;
                area += u64::from(width) * u64::from(height);
            }
            Err(error) => println!("{}x{} failed: {}", width, height, error),
        }
        if atlas.draw_size() != size {
            info!(width = atlas.draw_width(), height = atlas.draw_height(), "atlas grew");
        }
    }

    let (width, height) = atlas.draw_size();
    let utilization = area as f64 / (u64::from(width) * u64::from(height)) as f64;
    println!("placed {} of {} in {}x{} ({:.1}% used)", placed, sizes.len(), width, height, utilization * 100.0);
    Ok(())
}

/// Parse a `WxH` size.
fn parse_size(size: &[u8]) -> Result<(u32, u32), Box<dyn Error>> {
    let (width, height) = size.split_once_str("x").ok_or_else(|| format!("expected WxH, got {}", size.as_bstr()))?;
    Ok((width.to_str()?.parse()?, height.to_str()?.parse()?))
}

/// Parse a list of sizes, one per line. Blank lines and `#` comments are skipped.
fn read_sizes(data: &[u8]) -> Result<Vec<(u32, u32)>, Box<dyn Error>> {
    let mut sizes = Vec::default();
    for line in data.lines() {
        let line = match line.find_byte(b'#') {
            Some(comment) => &line[..comment],
            None => line,
        };
        let line = line.trim_ascii();
        if line.is_empty() {
            continue;
        }
        sizes.push(parse_size(line)?);
    }
    Ok(sizes)
}
