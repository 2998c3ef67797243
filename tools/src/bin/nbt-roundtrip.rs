use std::path::Path;
use std::process::exit;

use clap::{App, Arg};
use log::{info, warn};
use nbtree::NbtTree;
use nbtree_tools::{first_difference, init_logging, load_file, Result};

fn main() -> Result<()> {
    init_logging();

    let matches = App::new("nbt-roundtrip")
        .about("decode then re-encode an NBT file and check nothing changed")
        .arg(Arg::with_name("file").required(true))
        .get_matches();

    let path = Path::new(matches.value_of("file").unwrap());
    let data = load_file(path)?;

    let tree = NbtTree::from_bytes(&data)?;
    let encoded = tree.to_bytes()?;

    match first_difference(&data, &encoded) {
        None => {
            info!("{}: {} bytes, identical after round trip", path.display(), data.len());
            Ok(())
        }
        Some(offset) => {
            warn!(
                "{}: differs at offset {} (read {} bytes, wrote {})",
                path.display(),
                offset,
                data.len(),
                encoded.len()
            );
            exit(1);
        }
    }
}
