//! Metric name derivation.

use crate::annotation::GaugeAnnotation;
use crate::reflect::{Class, Method};

/// Join `first` and every non-empty element of `parts` with `.`.
///
/// ```
/// # use managed_gauges::naming::name;
/// assert_eq!("db.pool.size", name("db", ["pool", "", "size"]));
/// assert_eq!("db", name("db", [] as [&str; 0]));
/// ```
pub fn name<I, S>(first: &str, parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut name = first.to_owned();
    for part in parts {
        let part = part.as_ref();
        if part.is_empty() {
            continue;
        }
        if !name.is_empty() {
            name.push('.');
        }
        name.push_str(part);
    }
    name
}

/// Derive the metric name of a gauge method.
///
/// - explicit name, absolute: the explicit name;
/// - explicit name: `<type>.<explicit name>`;
/// - otherwise: `<type>.<method>`.
pub fn gauge_name(class: &Class, method: &Method, annotation: &GaugeAnnotation) -> String {
    match annotation.name() {
        Some(explicit) if annotation.is_absolute() => explicit.to_owned(),
        Some(explicit) => name(class.name(), [explicit]),
        None => name(class.name(), [method.name()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::ClassBuilder;
    use quickcheck::QuickCheck;

    struct Pool;

    fn class() -> Class {
        ClassBuilder::<Pool>::new("Pool")
            .getter("getCount", Some(GaugeAnnotation::default()), |_: &Pool| 1)
            .build()
    }

    #[test]
    fn derived_from_type_and_method() {
        let class = class();
        let method = class.method("getCount", &[]).unwrap();

        assert_eq!(
            "Pool.getCount",
            gauge_name(&class, method, &GaugeAnnotation::default())
        );
    }

    #[test]
    fn explicit_name_is_prefixed_unless_absolute() {
        let class = class();
        let method = class.method("getCount", &[]).unwrap();

        let relative = GaugeAnnotation::default().named("connections");
        assert_eq!("Pool.connections", gauge_name(&class, method, &relative));

        let absolute = relative.absolute(true);
        assert_eq!("connections", gauge_name(&class, method, &absolute));

        // Absolute without a name falls back to the derived name.
        let absolute_unnamed = GaugeAnnotation::default().absolute(true);
        assert_eq!(
            "Pool.getCount",
            gauge_name(&class, method, &absolute_unnamed)
        );
    }

    #[test]
    fn join_skips_empty_parts() {
        fn prop(first: String, parts: Vec<String>) -> bool {
            let joined = name(&first, &parts);
            let expected = std::iter::once(first.as_str())
                .chain(parts.iter().map(String::as_str))
                .filter(|p| !p.is_empty())
                .collect::<Vec<_>>()
                .join(".");
            joined == expected
        }
        QuickCheck::new().tests(1000).quickcheck(prop as fn(_, _) -> _)
    }
}
