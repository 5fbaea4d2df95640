//! log4rs encoder that renders a pattern line followed by the record's
//! structured key/value pairs (` address=1DEP8i...2aGvhD status=200`).

use std::io;

use log::{
    Record,
    kv::{Error, Key, Value, VisitSource},
};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::encode::{Color, Encode, Style, Write};
use serde::Deserialize;

const DEFAULT_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}";

#[derive(Debug, Deserialize)]
pub struct StructuredConsoleEncoderConfig {
    pub pattern: Option<String>,
}

#[derive(Debug)]
pub struct StructuredConsoleEncoder {
    line: PatternEncoder,
}

impl StructuredConsoleEncoder {
    pub fn new(pattern: &str) -> Self {
        Self {
            line: PatternEncoder::new(pattern),
        }
    }
}

impl Default for StructuredConsoleEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

impl Encode for StructuredConsoleEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> anyhow::Result<()> {
        self.line.encode(w, record)?;

        let mut pairs = PairWriter {
            writer: &mut *w,
            io_err: None,
        };
        if let Err(kv_err) = record.key_values().visit(&mut pairs) {
            match pairs.io_err.take() {
                Some(io_err) => return Err(io_err.into()),
                None => write!(w, " [KV Error: {}]", kv_err)?,
            }
        }

        w.write_all(b"\n")?;
        Ok(())
    }
}

struct PairWriter<'a> {
    writer: &'a mut dyn Write,
    io_err: Option<io::Error>,
}

impl PairWriter<'_> {
    fn write_pair(&mut self, key: &Key<'_>, value: &Value<'_>) -> io::Result<()> {
        self.writer.set_style(Style::new().text(Color::Cyan))?;
        write!(self.writer, " {}=", key)?;
        self.writer.set_style(&Style::default())?;
        write!(self.writer, "{}", value)
    }
}

impl<'kvs> VisitSource<'kvs> for PairWriter<'_> {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), Error> {
        self.write_pair(&key, &value).map_err(|e| {
            self.io_err = Some(e);
            Error::msg("io error during visit")
        })
    }
}

pub struct StructuredConsoleEncoderDeserializer;

impl log4rs::config::Deserialize for StructuredConsoleEncoderDeserializer {
    type Trait = dyn Encode;
    type Config = StructuredConsoleEncoderConfig;

    fn deserialize(
        &self,
        config: StructuredConsoleEncoderConfig,
        _: &log4rs::config::Deserializers,
    ) -> anyhow::Result<Box<dyn Encode>> {
        Ok(Box::new(match config.pattern.as_deref() {
            Some(pattern) => StructuredConsoleEncoder::new(pattern),
            None => StructuredConsoleEncoder::default(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log4rs::encode::writer::simple::SimpleWriter;

    #[test]
    fn test_encode_appends_key_values() {
        let encoder = StructuredConsoleEncoder::new("{m}");
        let kvs = [("status", 200u64)];

        let mut buf = Vec::new();
        encoder
            .encode(
                &mut SimpleWriter(&mut buf),
                &Record::builder()
                    .args(format_args!("request done"))
                    .level(log::Level::Info)
                    .key_values(&kvs)
                    .build(),
            )
            .unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "request done status=200\n");
    }
}
