//! Open Metrics text format implementation.
//!
//! ```
//! # use managed_gauges::encoding::text::encode;
//! # use managed_gauges::gauge::ConstGauge;
//! # use managed_gauges::registry::Registry;
//! #
//! let registry = Registry::default();
//! registry.register("Pool.getCount", ConstGauge::new(3u32)).unwrap();
//! registry.register("Pool.ratio", ConstGauge::new(0.25)).unwrap();
//!
//! let mut buffer = String::new();
//! encode(&mut buffer, &registry).unwrap();
//!
//! let expected = "# TYPE Pool_getCount gauge\n".to_owned() +
//!                "Pool_getCount 3\n" +
//!                "# TYPE Pool_ratio gauge\n" +
//!                "Pool_ratio 0.25\n" +
//!                "# EOF\n";
//! assert_eq!(expected, buffer);
//! ```

use std::fmt::Write;

use super::{escape_name, EscapingScheme};
use crate::registry::Registry;
use crate::value::Value;

/// Encode the gauges of the [`Registry`] in the OpenMetrics text format,
/// escaping names with the default [`EscapingScheme`].
///
/// Gauges are queried once each, in name order. Gauges yielding a
/// non-numeric value, or failing, are left out.
pub fn encode<W>(writer: &mut W, registry: &Registry) -> Result<(), std::fmt::Error>
where
    W: Write,
{
    encode_with_escaping(writer, registry, EscapingScheme::default())
}

/// Like [`encode`] with an explicit [`EscapingScheme`].
pub fn encode_with_escaping<W>(
    writer: &mut W,
    registry: &Registry,
    escaping_scheme: EscapingScheme,
) -> Result<(), std::fmt::Error>
where
    W: Write,
{
    for (name, gauge) in registry.iter() {
        let value = match gauge.value() {
            Ok(value) if value.is_numeric() => value,
            Ok(value) => {
                tracing::trace!(gauge = %name, kind = value.kind(), "Skipping non-numeric gauge.");
                continue;
            }
            Err(error) => {
                tracing::warn!(gauge = %name, %error, "Failed to query gauge.");
                continue;
            }
        };

        let name = escape_name(&name, escaping_scheme);

        writer.write_str("# TYPE ")?;
        writer.write_str(&name)?;
        writer.write_str(" gauge\n")?;

        writer.write_str(&name)?;
        writer.write_str(" ")?;
        encode_value(writer, &value)?;
        writer.write_str("\n")?;
    }

    writer.write_str("# EOF\n")?;

    Ok(())
}

fn encode_value<W: Write>(writer: &mut W, value: &Value) -> Result<(), std::fmt::Error> {
    match value {
        Value::Int(v) => writer.write_str(itoa::Buffer::new().format(*v)),
        Value::UInt(v) => writer.write_str(itoa::Buffer::new().format(*v)),
        Value::Float(v) => writer.write_str(dtoa::Buffer::new().format(*v)),
        Value::Bool(v) => writer.write_str(if *v { "1" } else { "0" }),
        Value::Text(_) | Value::Unit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaugeError;
    use crate::gauge::{ConstGauge, FnGauge};
    use crate::reflect::InvokeError;

    #[test]
    fn encode_empty_registry() {
        let mut encoded = String::new();
        encode(&mut encoded, &Registry::default()).unwrap();

        assert_eq!("# EOF\n", encoded);
    }

    #[test]
    fn encode_values() {
        let registry = Registry::default();
        registry.register("a.int", ConstGauge::new(-7)).unwrap();
        registry.register("b.uint", ConstGauge::new(u64::MAX)).unwrap();
        registry.register("c.float", ConstGauge::new(1.5)).unwrap();
        registry.register("d.bool", ConstGauge::new(true)).unwrap();

        let mut encoded = String::new();
        encode(&mut encoded, &registry).unwrap();

        let expected = "# TYPE a_int gauge\n".to_owned()
            + "a_int -7\n"
            + "# TYPE b_uint gauge\n"
            + "b_uint 18446744073709551615\n"
            + "# TYPE c_float gauge\n"
            + "c_float 1.5\n"
            + "# TYPE d_bool gauge\n"
            + "d_bool 1\n"
            + "# EOF\n";
        assert_eq!(expected, encoded);
    }

    #[test]
    fn skips_non_numeric_and_failing_gauges() {
        let registry = Registry::default();
        registry.register("status", ConstGauge::new("up")).unwrap();
        registry.register("nothing", ConstGauge::new(())).unwrap();
        registry
            .register(
                "broken",
                FnGauge::new(|| {
                    Err(GaugeError::IllegalArgument(InvokeError::ArgumentCount {
                        expected: 0,
                        actual: 1,
                    }))
                }),
            )
            .unwrap();
        registry.register("size", ConstGauge::new(2)).unwrap();

        let mut encoded = String::new();
        encode(&mut encoded, &registry).unwrap();

        assert_eq!("# TYPE size gauge\nsize 2\n# EOF\n", encoded);
    }

    #[test]
    fn dots_escaping() {
        let registry = Registry::default();
        registry.register("Pool.get_count", ConstGauge::new(1)).unwrap();

        let mut encoded = String::new();
        encode_with_escaping(&mut encoded, &registry, EscapingScheme::DotsEscaping).unwrap();

        assert_eq!(
            "# TYPE Pool_dot_get__count gauge\nPool_dot_get__count 1\n# EOF\n",
            encoded
        );
    }
}
