use fwscope::analysis::{aggregate_map, ResourceAggregator};
use fwscope::classification::Catalog;
use fwscope::config::Config;
use fwscope::mapfile::MapEntryParser;
use fwscope::report::markdown::resource_table;
use std::fs::File;
use std::io::BufReader;

const MAP: &str = "tests/fixtures/firmware.map";

fn open_map() -> BufReader<File> {
    BufReader::new(File::open(MAP).expect("Failed to open map fixture"))
}

#[test]
fn test_parser_counts_every_line_shape() {
    let mut parser = MapEntryParser::new(open_map());
    let entries: Vec<_> = parser.by_ref().collect::<Result<_, _>>().expect("Failed to parse map");

    let stats = parser.stats();
    assert_eq!(entries.len(), 14);
    assert_eq!(stats.entries, 14);
    assert_eq!(stats.malformed, 1, "the overflowing size is skipped");
    assert_eq!(stats.orphans, 1, "the continuation before any section is skipped");

    // Split entry: section from the header line, numbers from the next one
    let keypair = entries
        .iter()
        .find(|e| e.symbol_path.ends_with("ml-kem-512/kem.o"))
        .expect("split entry missing");
    assert_eq!(keypair.section, ".text.mlkem_keypair_derand_internal");
    assert_eq!(keypair.size_bytes, 0x1a4);

    // CRLF line keeps a clean path
    assert!(entries.iter().any(|e| e.section == ".text.main" && e.symbol_path == "build/Core/Src/main.o"));
}

#[test]
fn test_module_footprint() {
    let catalog = Catalog::default();
    let report = aggregate_map(open_map(), &catalog).expect("Failed to aggregate map");

    let usage = |name: &str| {
        let m = report.module(name).unwrap_or_else(|| panic!("module {name} missing"));
        (m.rom_bytes, m.ram_bytes)
    };

    assert_eq!(usage("mbedTLS (RSA)"), (1472, 0));
    assert_eq!(usage("ML-KEM-512"), (1700, 0));
    assert_eq!(usage("ML-DSA-44"), (0, 2048));
    assert_eq!(usage("Falcon-512"), (0, 0));
    assert_eq!(usage("STM32 HAL"), (232, 0));
    assert_eq!(usage("Core & System"), (692, 140));
    assert_eq!(usage("Other"), (64, 0));

    assert_eq!(report.total_rom_bytes, 4160);
    assert_eq!(report.total_ram_bytes, 2188);

    // Every category is listed, in catalog order, even when empty
    let names: Vec<_> = report.modules.iter().map(|m| m.name.as_str()).collect();
    let expected: Vec<_> = catalog.names().collect();
    assert_eq!(names, expected);
}

#[test]
fn test_aggregating_twice_gives_the_same_totals() {
    let catalog = Catalog::default();
    let first = aggregate_map(open_map(), &catalog).unwrap();
    let second = aggregate_map(open_map(), &catalog).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_custom_catalog_from_config() {
    let config = Config::from_toml_str(
        r#"
        [[categories]]
        name = "Vendor"
        patterns = ["vendor/"]

        [[categories]]
        name = "Crypto"
        patterns = ["ml-kem", "ml-dsa", "mbedtls"]
        "#,
    )
    .expect("Failed to parse config");
    let catalog = config.catalog().expect("Invalid catalog");

    let mut aggregator = ResourceAggregator::new(&catalog);
    for entry in MapEntryParser::new(open_map()) {
        aggregator.record(&entry.unwrap());
    }
    let report = aggregator.finish();

    assert_eq!(report.module("Vendor").map(|m| m.rom_bytes), Some(64));
    assert_eq!(report.module("Crypto").map(|m| (m.rom_bytes, m.ram_bytes)), Some((3172, 2048)));
    // Everything else lands in the appended catch-all
    assert_eq!(report.module("Other").map(|m| (m.rom_bytes, m.ram_bytes)), Some((924, 140)));
    assert_eq!(report.total_rom_bytes, 4160);
}

#[test]
fn test_resource_markdown_from_fixture() {
    let report = aggregate_map(open_map(), &Catalog::default()).unwrap();
    let table = resource_table(&report, 2048 * 1024, 512 * 1024);

    assert!(table.contains("| ML-KEM-512 | 1,700 | 0 |"));
    assert!(table.contains("| **TOTAL** | **4,160** | **2,188** |"));
    assert!(table.contains("| **Flash (ROM)** | **4,160** | **~4.1 KB** | 2,048 KB | ~0.2% |"));
    assert!(table.contains("| **RAM (Static)** | **2,188** | **~2.1 KB** | 512 KB | ~0.4% |"));
}
