use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cellwriter::errcode::ERR_UNKNOWN_OP;
use cellwriter::printer;
use cellwriter::{Cell, CellId, CellResult, Heap, WriterConfig};

/// Render a gallery of sample cell graphs in canonical form.
#[derive(Parser, Debug)]
#[command(name = "cellwriter")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Output buffer size in bytes, terminator included
    #[arg(short, long, default_value_t = 256)]
    capacity: usize,

    /// Scratch size for each list element; closure bodies get four times this
    #[arg(long, default_value_t = cellwriter::config::DEFAULT_SCRATCH)]
    scratch: usize,

    /// Nesting depth past which `...` is printed
    #[arg(long, default_value_t = cellwriter::config::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Heap capacity in cells
    #[arg(long, default_value_t = 4096)]
    heap: usize,

    /// Write into a string cell of `capacity` bytes instead of a plain buffer
    #[arg(long)]
    to_cell: bool,

    /// Only render samples whose name contains this text
    #[arg(value_name = "FILTER")]
    filter: Option<String>,

    /// Enable trace logging (otherwise RUST_LOG decides)
    #[arg(long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.trace {
        EnvFilter::new("trace")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut heap = Heap::new(cli.heap);
    let samples = match build_gallery(&mut heap) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error building samples: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!(cells = heap.len(), capacity = heap.capacity(), "sample gallery built");

    let config = WriterConfig::default()
        .with_scratch(cli.scratch)
        .with_max_depth(cli.max_depth);

    for (name, cell) in samples {
        if let Some(f) = &cli.filter {
            if !name.contains(f.as_str()) {
                continue;
            }
        }
        let text = if cli.to_cell {
            match render_to_cell(&mut heap, config, cell, cli.capacity) {
                Ok(t) => t,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::FAILURE;
                }
            }
        } else {
            let mut buf = vec![0u8; cli.capacity];
            let out = printer::write_with(&heap, config, Some(cell), &mut buf);
            String::from_utf8_lossy(out).into_owned()
        };
        println!("{:<10} {}", name, text);
    }
    ExitCode::SUCCESS
}

fn render_to_cell(
    heap: &mut Heap,
    config: WriterConfig,
    cell: CellId,
    capacity: usize,
) -> CellResult<String> {
    let dest = heap.buffer(capacity)?;
    printer::write_to_cell_with(heap, config, Some(cell), dest);
    let text = heap.cell(dest)?.text().unwrap_or_default();
    Ok(String::from_utf8_lossy(text).into_owned())
}

/// One sample per kind of cell.
fn build_gallery(heap: &mut Heap) -> CellResult<Vec<(&'static str, CellId)>> {
    let mut samples = Vec::new();

    samples.push(("int", heap.int(-1234)?));
    samples.push(("nil", heap.nil()?));

    let a = heap.symbol("a")?;
    let b = heap.symbol("b")?;
    let c = heap.symbol("c")?;
    samples.push(("list", heap.list(&[Some(a), Some(b), Some(c)])?));
    samples.push(("dotted", heap.cons(Some(a), Some(b))?));

    let greeting = heap.string("hello, world")?;
    samples.push(("string", greeting));
    samples.push(("bignum", heap.bignum("123456789012345678901234567890")?));

    let x = heap.symbol("x")?;
    samples.push(("lambda", heap.lambda(&["x", "y"], Some(x))?));
    samples.push(("builtin", heap.builtin(3)?));
    samples.push(("error", heap.error(ERR_UNKNOWN_OP)?));
    samples.push(("error99", heap.error(99)?));
    samples.push(("bytes", heap.bytes(&[0x0a, 0xff, 0x10])?));

    let fs_cell = heap.filesystem("/sd")?;
    let fs = heap.fs_of(fs_cell)?;
    samples.push(("stream", heap.stream("/sd/boot.l", fs)?));
    samples.push(("vector", heap.vector(&[1, 2, 3])?));
    samples.push(("corrupt", heap.alloc(Cell::Unknown(99))?));

    let inner = heap.list(&[Some(greeting), Some(a)])?;
    let one = heap.int(1)?;
    samples.push(("nested", heap.list(&[Some(one), Some(inner)])?));

    Ok(samples)
}
