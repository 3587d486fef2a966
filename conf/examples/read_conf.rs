// SPDX-License-Identifier: Apache-2.0

// Print one value, or every section, of a conf file.
//
//   cargo run --example read_conf -- app.conf
//   cargo run --example read_conf -- app.conf server port
//
// Set RUST_LOG=trace to watch the lexer.

use std::env;
use std::process;

use conf::Document;

fn main() {
    env_logger::init();

    let args: Vec<_> = env::args().collect();
    let path = match args.as_slice() {
        [_, path] | [_, path, _, _] => path,
        _ => {
            let program = args.first().map_or("read_conf", String::as_str);
            eprintln!("Usage: {program} file.conf [section key]");
            process::exit(1);
        }
    };

    let doc = match Document::open(path) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: unable to load '{path}': {e}");
            process::exit(1);
        }
    };

    if let [_, _, section, key] = args.as_slice() {
        match doc.get(section, key) {
            Ok(value) => println!("{value}"),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(2);
            }
        }
        return;
    }

    let mut sections: Vec<_> = doc.sections().collect();
    sections.sort_by_key(|s| s.name());
    for section in sections {
        println!("[{}]", section.name());
        let mut pairs: Vec<_> = section.iter().collect();
        pairs.sort_unstable();
        for (key, value) in pairs {
            println!("{key}={value}");
        }
    }
}
