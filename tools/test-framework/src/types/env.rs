/*!
   Types for exporting test setup information into environment variables.
*/

use core::fmt::{self, Display};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::Error;

/**
    This trait is implemented by data types that can export the contained
    information as environment variables.

    The framework saves them as a `.env` file that can be `source`d in a
    terminal to talk to the chains of a suspended test.
*/
pub trait ExportEnv {
    fn export_env(&self, writer: &mut impl EnvWriter);
}

pub trait EnvWriter {
    /**
       Write an environment variable. Writing a key twice keeps the last
       value.
    */
    fn write_env(&mut self, key: &str, value: &str);
}

/**
   An [`EnvWriter`] that writes each key as `{prefix}_{key}` to the inner
   writer.
*/
pub struct Prefixed<'a, Writer> {
    prefix: &'a str,
    inner: &'a mut Writer,
}

pub fn prefix_writer<'a, Writer: EnvWriter>(
    prefix: &'a str,
    inner: &'a mut Writer,
) -> Prefixed<'a, Writer> {
    Prefixed { prefix, inner }
}

impl<'a, Writer: EnvWriter> EnvWriter for Prefixed<'a, Writer> {
    fn write_env(&mut self, key: &str, value: &str) {
        let key = format!("{}_{}", self.prefix, key);
        self.inner.write_env(&key, value);
    }
}

/**
   The environment variables collected from an [`ExportEnv`], sorted by key.

   Displayed as one `KEY=VALUE` line per variable, quoting the values that
   the shell would otherwise split or expand.
*/
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvFile {
    vars: BTreeMap<String, String>,
}

impl EnvFile {
    pub fn collect(exporter: &impl ExportEnv) -> Self {
        let mut file = Self::default();
        exporter.export_env(&mut file);
        file
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        fs::write(path, format!("{}\n", self))?;
        Ok(())
    }
}

impl EnvWriter for EnvFile {
    fn write_env(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }
}

fn needs_quotes(value: &str) -> bool {
    value.is_empty()
        || value
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || "-_./:@,+=".contains(c)))
}

impl Display for EnvFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, (key, value)) in self.vars.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            if needs_quotes(value) {
                write!(f, "{}='{}'", key, value.replace('\'', r"'\''"))?;
            } else {
                write!(f, "{}={}", key, value)?;
            }
        }

        Ok(())
    }
}

/**
   The variables exported by `exporter` as `KEY=VALUE` lines.
*/
pub fn format_env(exporter: &impl ExportEnv) -> String {
    EnvFile::collect(exporter).to_string()
}

pub fn write_env(path: impl AsRef<Path>, exporter: &impl ExportEnv) -> Result<(), Error> {
    EnvFile::collect(exporter).save(path)
}
