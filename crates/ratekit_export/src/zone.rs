//! Zone range resolution per locale.

use crate::spec::{EnumLocale, SpecZone, SpecZoneBounds, SpecZoneRange};

/// Ordered zone columns for `locale` under the configured bounds.
///
/// Domestic zones are `1..=n_zone_domestic_max`; international zones are the
/// characters `A..=chr_zone_international_max`. Bounds are not validated: a
/// non-positive domestic bound or a bound below `A` yields an empty range, as
/// does an unknown locale, and a bound past `Z` runs on through the next
/// code points.
pub fn resolve_zone_range(locale: &EnumLocale, bounds: &SpecZoneBounds) -> SpecZoneRange {
    match locale {
        EnumLocale::Domestic => (1..=bounds.n_zone_domestic_max)
            .map(SpecZone::from_label)
            .collect(),
        EnumLocale::International => ('A'..=bounds.chr_zone_international_max)
            .map(SpecZone::from_label)
            .collect(),
        EnumLocale::Unknown(_) => SpecZoneRange::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive_bounds(n_domestic: i64, chr_international: char) -> SpecZoneBounds {
        SpecZoneBounds {
            n_zone_domestic_max: n_domestic,
            chr_zone_international_max: chr_international,
        }
    }

    #[test]
    fn test_domestic_default_yields_zones_1_to_8() {
        let zone_range = resolve_zone_range(&EnumLocale::Domestic, &SpecZoneBounds::default());

        assert_eq!(zone_range.len(), 8);
        assert_eq!(zone_range.headings().first().unwrap(), "Zone 1");
        assert_eq!(zone_range.headings().last().unwrap(), "Zone 8");
        assert_eq!(
            zone_range.keys(),
            (1..=8).map(|n| format!("zone{n}")).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_international_default_yields_zones_a_to_o() {
        let zone_range =
            resolve_zone_range(&EnumLocale::International, &SpecZoneBounds::default());

        assert_eq!(zone_range.len(), 15);
        assert_eq!(zone_range.zones[0], SpecZone::from_label('A'));
        assert_eq!(zone_range.zones[2].heading, "Zone C");
        assert_eq!(zone_range.zones[2].key, "zoneC");
        assert_eq!(zone_range.headings().last().unwrap(), "Zone O");
    }

    #[test]
    fn test_bound_only_affects_its_own_locale() {
        let bounds = derive_bounds(3, 'B');

        assert_eq!(resolve_zone_range(&EnumLocale::Domestic, &bounds).len(), 3);
        assert_eq!(resolve_zone_range(&EnumLocale::International, &bounds).len(), 2);
    }

    #[test]
    fn test_out_of_range_bounds_are_used_as_given() {
        assert!(resolve_zone_range(&EnumLocale::Domestic, &derive_bounds(0, 'O')).is_empty());
        assert!(resolve_zone_range(&EnumLocale::Domestic, &derive_bounds(-4, 'O')).is_empty());
        assert!(
            resolve_zone_range(&EnumLocale::International, &derive_bounds(8, '7')).is_empty()
        );

        let zone_range = resolve_zone_range(&EnumLocale::International, &derive_bounds(8, 'h'));
        assert_eq!(zone_range.len(), 40);
        assert_eq!(zone_range.zones[26].key, "zone[");
        assert_eq!(zone_range.headings().last().unwrap(), "Zone h");
    }

    #[test]
    fn test_unknown_locale_yields_no_zones() {
        let zone_range = resolve_zone_range(
            &EnumLocale::Unknown("lunar".to_string()),
            &SpecZoneBounds::default(),
        );
        assert!(zone_range.is_empty());
    }
}
