// build.rs
//
// Turns `locales/<lang>.toml` into the `t!` macro. English is always loaded
// and the selected language is layered on top, so a key missing from a
// translation still resolves.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

type Catalog = BTreeMap<String, String>;

const LOCALES_DIR: &str = "locales";
const FALLBACK_LANG: &str = "en";

fn main() {
    println!("cargo:rerun-if-env-changed=CHOP_LANG");
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={LOCALES_DIR}/");

    let lang = selected_language();
    println!("cargo:rustc-env=CHOP_LANG_EFFECTIVE={lang}");

    let mut catalog = read_catalog(FALLBACK_LANG)
        .unwrap_or_else(|e| panic!("{LOCALES_DIR}/{FALLBACK_LANG}.toml: {e}"));

    if lang != FALLBACK_LANG {
        match read_catalog(&lang) {
            Ok(overrides) => {
                for key in overrides.keys().filter(|k| !catalog.contains_key(*k)) {
                    println!("cargo:warning={LOCALES_DIR}/{lang}.toml defines unknown key '{key}'");
                }
                catalog.extend(overrides);
            }
            Err(e) => println!(
                "cargo:warning=Cannot use {LOCALES_DIR}/{lang}.toml ({e}), messages stay in English"
            ),
        }
    }

    let out_dir = env::var("OUT_DIR").unwrap_or_else(|e| panic!("OUT_DIR: {e}"));
    let dest = Path::new(&out_dir).join("translations.rs");
    fs::write(&dest, render_macro(&catalog))
        .unwrap_or_else(|e| panic!("{}: {e}", dest.display()));
}

/// A `lang_*` cargo feature wins over `CHOP_LANG`. With several features the
/// alphabetically first one is used.
fn selected_language() -> String {
    let mut from_features: Vec<String> = env::vars()
        .filter_map(|(key, _)| {
            key.strip_prefix("CARGO_FEATURE_LANG_")
                .map(str::to_lowercase)
        })
        .collect();
    from_features.sort();

    if from_features.len() > 1 {
        println!(
            "cargo:warning=Several language features enabled {from_features:?}, using '{}'",
            from_features[0]
        );
    }

    from_features
        .into_iter()
        .next()
        .or_else(|| env::var("CHOP_LANG").ok())
        .unwrap_or_else(|| FALLBACK_LANG.to_string())
}

fn read_catalog(lang: &str) -> Result<Catalog, String> {
    let path = format!("{LOCALES_DIR}/{lang}.toml");
    let content = fs::read_to_string(&path).map_err(|e| e.to_string())?;
    toml::from_str(&content).map_err(|e| e.to_string())
}

/// One literal arm per key. Unknown keys hit the last arm and fail to compile.
fn render_macro(catalog: &Catalog) -> String {
    let mut code = String::from(
        "/// Looks up a message in the catalog compiled into this build.\n#[macro_export]\nmacro_rules! t {\n",
    );
    for (key, value) in catalog {
        code.push_str(&format!("    ({key:?}) => {{ {value:?} }};\n"));
    }
    code.push_str(
        "    ($key:expr) => {{ compile_error!(concat!(\"Missing translation key: \", $key)) }};\n}\n",
    );
    code
}
