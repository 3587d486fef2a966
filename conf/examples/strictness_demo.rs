// SPDX-License-Identifier: Apache-2.0

// The same input under the strict and the loose configuration.

use conf::{ChunkReader, DuplicatePolicy, Parser, ParserConfig, ValueTermination};

const INPUT: &[u8] = b"; defaults first\n\
[log]\n\
level=info\n\
[log]\n\
level=debug";

fn main() {
    env_logger::init();

    println!("Input:\n{}\n", String::from_utf8_lossy(INPUT));

    let strict = ParserConfig::default();
    match Parser::with_config(ChunkReader::full_slice(INPUT), strict).parse() {
        Ok(doc) => println!("strict: level={:?}", doc.get("log", "level")),
        Err(e) => println!("strict: {e}"),
    }

    let loose = ParserConfig::new().with_duplicates(DuplicatePolicy::Overwrite);
    match Parser::with_config(ChunkReader::new(INPUT, 4), loose).parse() {
        Ok(doc) => println!("loose: level={:?}", doc.get("log", "level")),
        Err(e) => println!("loose: {e}"),
    }

    let picky = loose.with_value_termination(ValueTermination::NewlineOnly);
    match Parser::with_config(ChunkReader::full_slice(INPUT), picky).parse() {
        Ok(doc) => println!("newline-only: level={:?}", doc.get("log", "level")),
        Err(e) => println!("newline-only: {e}"),
    }
}
