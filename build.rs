use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn generate_tests() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut dst = File::create(Path::new(&out_dir).join("fragment_tests.rs")).unwrap();

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let fragments_dir = manifest_dir.join("tests").join("fragments");
    let fragments = fs::read_dir(fragments_dir).unwrap();

    let expectations_path = manifest_dir.join("tests").join("expectations");

    println!("cargo:rerun-if-changed=tests/fragments");

    let mut entries: Vec<_> = fragments.map(|entry| entry.unwrap().path()).collect();
    entries.sort();

    for path in entries {
        assert_eq!(path.extension().unwrap().to_str().unwrap(), "html");

        let func = path
            .file_stem()
            .unwrap()
            .to_str()
            .unwrap()
            .replace(|c: char| !c.is_alphanumeric(), "_")
            .to_lowercase();
        writeln!(
            dst,
            "test_fragment!(fragment_{}, {:?}, {:?});",
            func,
            path,
            expectations_path,
        )
        .unwrap();
    }
}

fn main() {
    generate_tests();
}
