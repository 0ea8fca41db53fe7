use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// (field name, cargo feature env, width in bits), laid out from bit 0 upward.
const FIELDS: [(&str, &str, usize); 8] = [
    ("tag", "CARGO_FEATURE_TAG", 16),
    ("sport", "CARGO_FEATURE_SPORT", 16),
    ("dport", "CARGO_FEATURE_DPORT", 16),
    ("sip", "CARGO_FEATURE_SIP", 32),
    ("dip", "CARGO_FEATURE_DIP", 32),
    ("proto", "CARGO_FEATURE_PROTO", 8),
    ("tos", "CARGO_FEATURE_TOS", 8),
    ("ethtype", "CARGO_FEATURE_ETHTYPE", 16),
];

fn main() {
    let path = Path::new(&env::var("OUT_DIR").unwrap()).join("codegen.rs");
    let mut file = BufWriter::new(File::create(&path).unwrap());
    let mut m: phf_codegen::OrderedMap<&'static str> = phf_codegen::OrderedMap::new();
    let mut counter: usize = 0;

    for (name, feature, width) in FIELDS {
        if env::var_os(feature).is_none() {
            continue;
        }
        m.entry(
            name,
            format!("({}usize, {}usize)", counter, counter + width).as_str(),
        );
        counter += width;
    }

    write!(
        &mut file,
        "pub static FIELD_MAP: phf::OrderedMap<&'static str, (usize, usize)> = {}",
        m.build()
    )
    .unwrap();
    writeln!(&mut file, ";\n").unwrap();
    // a zero-width layout still needs one storage element for the bit arrays
    writeln!(
        &mut file,
        "pub const MAX_POS: usize = {}usize;\n",
        counter.max(8)
    )
    .unwrap();
    println!("cargo:rerun-if-changed=build.rs");
}
