use phf_codegen::Map;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn main() {
    let path = Path::new(&env::var("OUT_DIR").unwrap()).join("seat_rings.rs");
    let mut file = BufWriter::new(File::create(&path).unwrap());

    // Acting order per table size; the blinds always close the ring.
    let rings: [(u8, &[&str]); 8] = [
        (2, &["Btn", "Bb"]),
        (3, &["Btn", "Sb", "Bb"]),
        (4, &["Utg", "Btn", "Sb", "Bb"]),
        (6, &["Utg", "Hj", "Co", "Btn", "Sb", "Bb"]),
        (7, &["Utg", "Utg1", "Hj", "Co", "Btn", "Sb", "Bb"]),
        (8, &["Utg", "Utg1", "Lj", "Hj", "Co", "Btn", "Sb", "Bb"]),
        (9, &["Utg", "Utg1", "Utg2", "Lj", "Hj", "Co", "Btn", "Sb", "Bb"]),
        (10, &["Utg", "Utg1", "Utg2", "Utg3", "Lj", "Hj", "Co", "Btn", "Sb", "Bb"]),
    ];

    let values: Vec<(u8, String)> = rings
        .iter()
        .map(|(size, ring)| {
            let positions = ring
                .iter()
                .map(|name| format!("Position::{}", name))
                .collect::<Vec<_>>()
                .join(", ");
            (*size, format!("&[{}]", positions))
        })
        .collect();

    let mut map = Map::new();
    for (size, value) in &values {
        map.entry(*size, value);
    }

    writeln!(
        &mut file,
        "static SEAT_RINGS: phf::Map<u8, &'static [Position]> = {};",
        map.build()
    )
    .unwrap();
    println!("cargo:rerun-if-changed=build.rs");
}
