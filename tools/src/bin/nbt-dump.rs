use std::path::Path;

use clap::{App, Arg};
use log::{error, info};
use nbtree::{NbtTree, ReadOptions};
use nbtree_tools::{init_logging, load_file, Result};

fn main() -> Result<()> {
    init_logging();

    let matches = App::new("nbt-dump")
        .about("print the contents of an NBT file, gzipped or not")
        .arg(Arg::with_name("file").required(true))
        .arg(
            Arg::with_name("json")
                .long("json")
                .takes_value(false)
                .help("print the tree as JSON instead of debug output"),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .takes_value(false)
                .help("fail if the file does not start with a compound"),
        )
        .get_matches();

    let path = Path::new(matches.value_of("file").unwrap());
    let data = load_file(path)?;
    let opts = ReadOptions::default().strict_root(matches.is_present("strict"));

    let mut tree = NbtTree::new();
    if let Err(e) = tree.read_from_with(data.as_slice(), &opts) {
        error!("could not decode {}: {}", path.display(), e);
        return Err(e.into());
    }

    let root = match tree.root() {
        Some(root) => root,
        None => {
            info!("{} has no root compound", path.display());
            return Ok(());
        }
    };

    if matches.is_present("json") {
        let json = serde_json::json!({ "name": tree.name(), "root": root });
        println!("{}", serde_json::to_string_pretty(&json)?);
    } else {
        println!("{:?}: {:#?}", tree.name(), root);
    }

    Ok(())
}
