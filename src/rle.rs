// --- File: rle.rs ---
// Run-length encoded pattern files:
//
//   #N Glider
//   x = 3, y = 3, rule = B3/S23
//   bo$2bo$3o!
use crate::grid::{Grid, GridError};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RleError {
    #[error("could not read pattern file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not find grid dimensions in the RLE header")]
    MissingDimensions,
    #[error("invalid header value '{0}'")]
    BadHeader(String),
    #[error("pattern body places live cells on row {row}, beyond the declared height {height}")]
    RowOverflow { row: usize, height: usize },
    #[error("run count starting '{0}' does not fit in a machine word")]
    RunTooLong(String),
    #[error(transparent)]
    Grid(#[from] GridError),
}

pub fn load(path: impl AsRef<Path>) -> Result<Grid, RleError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let grid = parse(&text)?;
    log::info!(
        "Loaded {}: {}x{} with {} live cells",
        path.display(),
        grid.height(),
        grid.width(),
        grid.live_count()
    );
    Ok(grid)
}

pub fn parse(text: &str) -> Result<Grid, RleError> {
    let mut width = 0usize;
    let mut height = 0usize;
    let mut header_found = false;
    let mut body = String::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if !header_found && line.contains('x') && line.contains('y') {
            for part in line.split(',') {
                let part = part.trim();
                if part.starts_with('x') {
                    width = header_value(part)?;
                } else if part.starts_with('y') {
                    height = header_value(part)?;
                }
            }
            header_found = true;
        } else {
            body.push_str(line);
        }
    }

    if let Some(end) = body.find('!') {
        body.truncate(end);
    }
    if width == 0 || height == 0 {
        return Err(RleError::MissingDimensions);
    }

    Grid::checked_area(height, width)?;

    let mut grid = Grid::new(height, width);
    let (mut x, mut y) = (0usize, 0usize);
    let mut run_count = 0usize;
    let mut clipped = 0usize;

    for (i, ch) in body.char_indices() {
        if let Some(digit) = ch.to_digit(10) {
            run_count = run_count
                .checked_mul(10)
                .and_then(|n| n.checked_add(digit as usize))
                .ok_or_else(|| run_too_long(&body[..=i]))?;
            continue;
        }
        let count = run_count.max(1);
        match ch {
            'o' => {
                if y >= height {
                    return Err(RleError::RowOverflow { row: y, height });
                }
                let end = x.saturating_add(count);
                let kept = end.min(width);
                for col in x..kept {
                    grid.set(y, col, true);
                }
                clipped = clipped.saturating_add(end - kept.max(x));
                x = end;
            }
            'b' => x = x.saturating_add(count),
            '$' => {
                y = y.saturating_add(count);
                x = 0;
            }
            _ => {}
        }
        run_count = 0;
    }

    if clipped > 0 {
        log::warn!("Dropped {} live cells past the declared width {}", clipped, width);
    }
    Ok(grid)
}

// The digits of the run that overflowed, for the error message.
fn run_too_long(body_so_far: &str) -> RleError {
    let digits = body_so_far
        .bytes()
        .rev()
        .take_while(u8::is_ascii_digit)
        .count();
    RleError::RunTooLong(body_so_far[body_so_far.len() - digits..].to_string())
}

fn header_value(part: &str) -> Result<usize, RleError> {
    let (_, value) = part
        .split_once('=')
        .ok_or_else(|| RleError::BadHeader(part.to_string()))?;
    value
        .trim()
        .parse()
        .map_err(|_| RleError::BadHeader(part.to_string()))
}
