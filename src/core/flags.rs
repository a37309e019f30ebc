//! Generator flag assembly.
//!
//! Turns a [`BuildConfig`] into the ordered `key=value` list passed to
//! `gn gen --args=...`.

use std::fmt;

use serde::Serialize;

use crate::core::config::BuildConfig;
use crate::core::target::TargetOs;

/// Macro definition compensating for a builtin missing from the OHOS sysroot.
pub const OHOS_BUILTIN_WORKAROUND: &str = "-D__builtin_available(...)=1";

/// Default C compiler for Linux-like targets.
pub const DEFAULT_CC: &str = "clang";

/// Default C++ compiler for Linux-like targets.
pub const DEFAULT_CXX: &str = "clang++";

/// A gn literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GnValue {
    Bool(bool),
    String(String),
    List(Vec<String>),
}

impl fmt::Display for GnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GnValue::Bool(b) => write!(f, "{}", b),
            GnValue::String(s) => write!(f, "\"{}\"", escape(s)),
            GnValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "\"{}\"", escape(item))?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Escape the characters gn treats specially inside string literals.
///
/// Backslashes go first so the escapes added for `"` and `$` survive.
fn escape(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('$', "\\$")
}

/// A single `key=value` generator argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flag {
    pub key: &'static str,
    pub value: GnValue,
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Ordered list of generator arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlagList {
    flags: Vec<Flag>,
}

impl FlagList {
    /// Assemble the flag list for a configuration.
    pub fn assemble(config: &BuildConfig) -> FlagList {
        let mut list = FlagList::default();
        let os = config.target_os();

        list.push_bool("is_debug", config.is_debug());
        list.push_bool("is_component_build", config.is_component_build());
        list.push_bool("is_trivial_abi", config.is_trivial_abi());
        list.push_str("target_cpu", config.effective_cpu());
        list.push_str("target_os", os.gn_name());

        let gpu = os.enables_gpu();
        list.push_bool("skia_enable_gpu", gpu);
        list.push_bool("skia_use_gl", gpu);
        list.push_bool("skia_use_egl", gpu);

        if os == TargetOs::Ohos {
            list.push_bool("skia_use_system_freetype2", false);
            list.push_bool("skia_enable_pdf", false);
            list.push_bool("skia_use_system_harfbuzz", false);
            list.push_bool("skia_use_system_icu", false);
            list.push(
                "extra_cflags",
                GnValue::List(vec![OHOS_BUILTIN_WORKAROUND.to_string()]),
            );
        }

        if os == TargetOs::Win {
            if let Some(dir) = config.clang_win() {
                list.push_str("clang_win", dir);
            }
        }

        let default_toolchain = os.uses_default_toolchain();
        match config.cc() {
            Some(cc) => list.push_str("cc", cc),
            None if default_toolchain => list.push_str("cc", DEFAULT_CC),
            None => {}
        }
        match config.cxx() {
            Some(cxx) => list.push_str("cxx", cxx),
            None if default_toolchain => list.push_str("cxx", DEFAULT_CXX),
            None => {}
        }

        list
    }

    fn push(&mut self, key: &'static str, value: GnValue) {
        self.flags.push(Flag { key, value });
    }

    fn push_bool(&mut self, key: &'static str, value: bool) {
        self.push(key, GnValue::Bool(value));
    }

    fn push_str(&mut self, key: &'static str, value: &str) {
        self.push(key, GnValue::String(value.to_string()));
    }

    /// Iterate over the flags in order.
    pub fn iter(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    /// Look up a flag's value by key.
    pub fn get(&self, key: &str) -> Option<&GnValue> {
        self.flags.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    /// Whether a rendered `key=value` entry is present.
    pub fn contains(&self, entry: &str) -> bool {
        self.flags.iter().any(|f| f.to_string() == entry)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Render each flag as `key=value`.
    pub fn to_strings(&self) -> Vec<String> {
        self.flags.iter().map(Flag::to_string).collect()
    }

    /// The single `--args=` parameter for `gn gen`.
    pub fn to_gn_arg(&self) -> String {
        format!("--args={}", self.to_strings().join(" "))
    }
}
