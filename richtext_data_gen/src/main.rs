// Copyright 2025 the Richtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small CLI that regenerates the binary property tries Richtext loads at runtime.
//! It reads the Unicode data compiled into ICU4X, builds the bidi, line break, grapheme and word
//! boundary tries, and writes them as compressed resources into the given directory.

fn main() {
    use std::{env, ffi::OsString, path::PathBuf, process};

    let mut args = env::args_os();
    let exe = args
        .next()
        .unwrap_or_else(|| OsString::from("richtext_data_gen"));

    let Some(out_arg) = args.next() else {
        eprintln!("Usage: {} <output-dir>", exe.to_string_lossy());
        process::exit(1);
    };

    let out_path = PathBuf::from(out_arg);

    if let Err(err) = std::fs::create_dir_all(&out_path) {
        eprintln!(
            "Failed to create output directory '{}': {}",
            out_path.display(),
            err
        );
        process::exit(1);
    }

    if let Err(err) = richtext_data_gen::generate(&out_path) {
        eprintln!(
            "Failed to write tries to '{}': {}",
            out_path.display(),
            err
        );
        process::exit(1);
    }

    for name in richtext_data_gen::RESOURCE_NAMES {
        eprintln!("Wrote {}", out_path.join(name).display());
    }
}
