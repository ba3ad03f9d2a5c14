//! Tests for writing bundles and round-tripping compiled archives.
mod common;
use common::*;
use kumitate::prelude::*;
use std::fs;

fn assemble_units() -> Vec<CompiledUnit> {
    let assembler = Assembler::default();
    vec![
        assembler
            .assemble(
                &RouteSpec::new("pages", "Get Page", "/pages"),
                &create_fetch_parse_graph(),
                &create_fetch_parse_fragment(),
            )
            .expect("Failed to assemble pages route"),
        assembler
            .assemble(
                &RouteSpec::new("customers", "Customer Summary", "/customers"),
                &create_customer_graph(),
                &create_customer_fragment(),
            )
            .expect("Failed to assemble customers route"),
    ]
}

#[test]
fn test_bundle_layout() {
    let units = assemble_units();
    let bundle = Bundle::from_units(&units).expect("Failed to build bundle");

    let paths: Vec<&str> = bundle.files().iter().map(|f| f.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "__init__.py",
            "service_0.py",
            "service_0_graph.json",
            "service_1.py",
            "service_1_graph.json",
            "requirements.txt",
        ]
    );
    assert_eq!(
        bundle.file("requirements.txt").unwrap().contents,
        "requests==2.31.0\nbeautifulsoup4>=4.12\npydantic\n"
    );

    let graph: Graph =
        serde_json::from_str(&bundle.file("service_1_graph.json").unwrap().contents).unwrap();
    assert_eq!(graph, create_customer_graph());
}

#[test]
fn test_bundle_write_is_byte_identical() {
    let first_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let second_dir = tempfile::tempdir().expect("Failed to create temp dir");

    Bundle::from_units(&assemble_units())
        .unwrap()
        .write_to(first_dir.path())
        .expect("Failed to write bundle");
    Bundle::from_units(&assemble_units())
        .unwrap()
        .write_to(second_dir.path().join("nested"))
        .expect("Failed to write bundle");

    for name in ["service_0.py", "service_1_graph.json", "requirements.txt"] {
        let first = fs::read(first_dir.path().join(name)).unwrap();
        let second = fs::read(second_dir.path().join("nested").join(name)).unwrap();
        assert_eq!(first, second, "{} differs between runs", name);
    }

    let service = fs::read_to_string(first_dir.path().join("service_0.py")).unwrap();
    assert!(service.contains("def get_page_request(url: str):"));
}

#[test]
fn test_archive_round_trip() {
    let units = assemble_units();
    let archive = CompiledArchive::new(units.clone());
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("units.bin");

    archive.save(&path).expect("Failed to save archive");
    let loaded = CompiledArchive::from_file(&path).expect("Failed to load archive");

    assert_eq!(loaded.units, units);
}

#[test]
fn test_corrupt_archive_is_rejected() {
    assert!(CompiledArchive::from_bytes(&[0xff, 0xff, 0xff]).is_err());
}
