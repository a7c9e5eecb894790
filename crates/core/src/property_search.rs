//! Property search criteria and the filter predicate builder.
//!
//! A search request is a sparse [`SearchCriteria`]: every field is optional
//! and independent. [`build_predicates`] validates the criteria and derives at
//! most one [`Predicate`] per criterion; the resulting list is read as a
//! logical AND. Derivation is a pure fold over a fixed table of derivation
//! functions, so no predicate can observe another one's state.
//!
//! Predicates are plain data. The repository layer renders them to SQL, and
//! [`Predicate::matches`] evaluates them against an in-memory
//! [`PropertySnapshot`] with the same semantics (SQL `NULL` never matches).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{CoreError, FieldError};
use crate::rental::{ListingStatus, PreferredTenant, FURNISHED_NAMES, UNFURNISHED_NAMES};
use crate::types::{Date, DbId};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Hard ceiling on the number of properties one search returns.
pub const MAX_SEARCH_RESULTS: i64 = 50;

/// Default number of recent searches returned to a user.
pub const DEFAULT_RECENT_SEARCHES: i64 = 5;

/// Maximum number of recent searches returned to a user.
pub const MAX_RECENT_SEARCHES: i64 = 50;

/// Rent bounds must stay below this value (`NUMERIC(10,2)` history columns).
pub const RENT_BOUND_LIMIT: f64 = 100_000_000.0;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

/// Caller-supplied search criteria. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Free text matched against city, locality and street address.
    pub location: Option<String>,
    pub property_type: Option<DbId>,
    pub furnishing: Option<DbId>,
    /// Exact bedroom count.
    pub bedrooms: Option<i32>,
    /// Minimum bathroom count.
    pub bathrooms: Option<i32>,
    pub min_area: Option<i32>,
    pub max_area: Option<i32>,
    pub min_rent: Option<f64>,
    pub max_rent: Option<f64>,
    /// Kept as text so an unknown value is reported as a field error.
    pub preferred_tenant: Option<String>,
    pub parking_required: Option<bool>,
    /// Latest acceptable `available_from` date.
    pub available_from: Option<Date>,
    /// Amenity ids; see [`amenity_ids_from_value`] for the accepted shapes.
    #[serde(deserialize_with = "deserialize_amenity_ids")]
    pub amenities: Vec<DbId>,
    pub immediately_available: Option<bool>,
    pub furnished: Option<bool>,
}

impl SearchCriteria {
    /// Parse criteria from a raw JSON body.
    ///
    /// Type mismatches (e.g. a string for `bedrooms`) are validation errors;
    /// malformed amenity tokens are not (they are dropped).
    pub fn from_json(value: &Value) -> Result<Self, CoreError> {
        serde_json::from_value(value.clone())
            .map_err(|e| CoreError::Validation(format!("Malformed search criteria: {e}")))
    }

    /// Trimmed location text, or `None` when absent or blank.
    pub fn location_text(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// The requested tenant preference, ignoring blank strings and unknown values.
    ///
    /// Unknown values are rejected by [`validate`](Self::validate) first.
    pub fn tenant_preference(&self) -> Option<PreferredTenant> {
        self.preferred_tenant
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse().ok())
    }

    /// Reject contradictory ranges, negative figures, rents the history table
    /// cannot store and unknown enum values.
    ///
    /// All problems are collected so the caller sees every offending field at once.
    pub fn validate(&self) -> Result<(), CoreError> {
        let mut errors = Vec::new();

        check_non_negative(&mut errors, "bedrooms", self.bedrooms.map(f64::from));
        check_non_negative(&mut errors, "bathrooms", self.bathrooms.map(f64::from));
        check_non_negative(&mut errors, "min_area", self.min_area.map(f64::from));
        check_non_negative(&mut errors, "max_area", self.max_area.map(f64::from));
        check_non_negative(&mut errors, "min_rent", self.min_rent);
        check_non_negative(&mut errors, "max_rent", self.max_rent);
        check_rent_precision(&mut errors, "min_rent", self.min_rent);
        check_rent_precision(&mut errors, "max_rent", self.max_rent);

        if self.location.as_deref().is_some_and(|s| s.contains('\0')) {
            errors.push(FieldError::new(
                &["location"],
                "location must not contain NUL characters",
            ));
        }

        if let (Some(min), Some(max)) = (self.min_rent, self.max_rent) {
            if min > max {
                errors.push(FieldError::new(
                    &["min_rent", "max_rent"],
                    format!("min_rent ({min}) cannot be greater than max_rent ({max})"),
                ));
            }
        }

        if let (Some(min), Some(max)) = (self.min_area, self.max_area) {
            if min > max {
                errors.push(FieldError::new(
                    &["min_area", "max_area"],
                    format!("min_area ({min}) cannot be greater than max_area ({max})"),
                ));
            }
        }

        if let Some(raw) = self.preferred_tenant.as_deref().map(str::trim) {
            if !raw.is_empty() && raw.parse::<PreferredTenant>().is_err() {
                let expected: Vec<&str> =
                    PreferredTenant::ALL.iter().map(|t| t.as_str()).collect();
                errors.push(FieldError::new(
                    &["preferred_tenant"],
                    format!(
                        "preferred_tenant '{raw}' is not one of: {}",
                        expected.join(", ")
                    ),
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidCriteria(errors))
        }
    }
}

fn check_non_negative(errors: &mut Vec<FieldError>, field: &'static str, value: Option<f64>) {
    if let Some(v) = value {
        if v < 0.0 {
            errors.push(FieldError::new(
                &[field],
                format!("{field} must not be negative, got {v}"),
            ));
        }
    }
}

/// At most 8 integer digits and 2 decimal places.
fn check_rent_precision(errors: &mut Vec<FieldError>, field: &'static str, value: Option<f64>) {
    let Some(v) = value else { return };
    if !v.is_finite() || v.abs() >= RENT_BOUND_LIMIT {
        errors.push(FieldError::new(
            &[field],
            format!("{field} must be less than {RENT_BOUND_LIMIT:.0}, got {v}"),
        ));
        return;
    }
    let cents = v * 100.0;
    if (cents - cents.round()).abs() > 1e-3 {
        errors.push(FieldError::new(
            &[field],
            format!("{field} must have at most 2 decimal places, got {v}"),
        ));
    }
}

// ---------------------------------------------------------------------------
// Amenity id leniency
// ---------------------------------------------------------------------------

/// Parse a comma-separated list of amenity ids, dropping malformed tokens.
///
/// Only tokens made entirely of ASCII digits (after trimming) survive.
/// Duplicates collapse and the result is sorted.
///
/// ```
/// use rentwise_core::property_search::parse_amenity_ids;
/// assert_eq!(parse_amenity_ids("3, 1,wifi,,1"), vec![1, 3]);
/// assert!(parse_amenity_ids("gym").is_empty());
/// ```
pub fn parse_amenity_ids(raw: &str) -> Vec<DbId> {
    normalize_ids(raw.split(',').filter_map(parse_id_token))
}

/// Extract amenity ids from any JSON shape a client may send.
///
/// Accepts an array of numbers and/or numeric strings, a single number, or a
/// comma-separated string. Anything that is not a non-negative integer is
/// silently dropped rather than failing the search.
pub fn amenity_ids_from_value(value: &Value) -> Vec<DbId> {
    match value {
        Value::String(s) => parse_amenity_ids(s),
        Value::Array(items) => normalize_ids(items.iter().filter_map(id_from_scalar)),
        Value::Number(_) => normalize_ids(id_from_scalar(value)),
        _ => Vec::new(),
    }
}

fn deserialize_amenity_ids<'de, D>(deserializer: D) -> Result<Vec<DbId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.map(|v| amenity_ids_from_value(&v)).unwrap_or_default())
}

fn id_from_scalar(value: &Value) -> Option<DbId> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| DbId::try_from(n).ok()),
        Value::String(s) => parse_id_token(s),
        _ => None,
    }
}

fn parse_id_token(token: &str) -> Option<DbId> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn normalize_ids(ids: impl IntoIterator<Item = DbId>) -> Vec<DbId> {
    let mut ids: Vec<DbId> = ids.into_iter().collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// One independent search constraint derived from one criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// City, locality or street address contains the text (case-insensitive).
    Location(String),
    PropertyType(DbId),
    Furnishing(DbId),
    Bedrooms(i32),
    MinBathrooms(i32),
    /// Inclusive bounds on total area; at least one bound is set.
    AreaRange { min: Option<i32>, max: Option<i32> },
    /// Inclusive bounds on the rent of one active listing; at least one bound is set.
    RentRange { min: Option<f64>, max: Option<f64> },
    /// Property preference equals the requested kind or is `any`.
    TenantPreference(PreferredTenant),
    ParkingAvailable,
    /// Property becomes available on or before the date.
    AvailableBy(Date),
    /// Property has a junction row for every id (sorted, unique, non-empty).
    HasAllAmenities(Vec<DbId>),
    /// Some active listing is immediately available.
    ImmediatelyAvailable,
    /// Furnishing name is in the furnished (`true`) or unfurnished (`false`) set.
    Furnished(bool),
}

type Derivation = fn(&SearchCriteria) -> Option<Predicate>;

/// One entry per recognised criterion, applied independently.
const DERIVATIONS: &[Derivation] = &[
    derive_location,
    derive_property_type,
    derive_furnishing,
    derive_bedrooms,
    derive_bathrooms,
    derive_area,
    derive_rent,
    derive_tenant,
    derive_parking,
    derive_available_by,
    derive_amenities,
    derive_immediately_available,
    derive_furnished,
];

/// Validate `criteria` and derive the conjunction of sub-predicates.
///
/// An empty result means "no constraint beyond base visibility".
pub fn build_predicates(criteria: &SearchCriteria) -> Result<Vec<Predicate>, CoreError> {
    criteria.validate()?;
    Ok(DERIVATIONS
        .iter()
        .filter_map(|derive| derive(criteria))
        .collect())
}

fn derive_location(c: &SearchCriteria) -> Option<Predicate> {
    c.location_text().map(|s| Predicate::Location(s.to_string()))
}

fn derive_property_type(c: &SearchCriteria) -> Option<Predicate> {
    c.property_type.map(Predicate::PropertyType)
}

fn derive_furnishing(c: &SearchCriteria) -> Option<Predicate> {
    c.furnishing.map(Predicate::Furnishing)
}

fn derive_bedrooms(c: &SearchCriteria) -> Option<Predicate> {
    c.bedrooms.map(Predicate::Bedrooms)
}

fn derive_bathrooms(c: &SearchCriteria) -> Option<Predicate> {
    c.bathrooms.map(Predicate::MinBathrooms)
}

fn derive_area(c: &SearchCriteria) -> Option<Predicate> {
    if c.min_area.is_none() && c.max_area.is_none() {
        return None;
    }
    Some(Predicate::AreaRange {
        min: c.min_area,
        max: c.max_area,
    })
}

fn derive_rent(c: &SearchCriteria) -> Option<Predicate> {
    if c.min_rent.is_none() && c.max_rent.is_none() {
        return None;
    }
    Some(Predicate::RentRange {
        min: c.min_rent,
        max: c.max_rent,
    })
}

fn derive_tenant(c: &SearchCriteria) -> Option<Predicate> {
    c.tenant_preference().map(Predicate::TenantPreference)
}

fn derive_parking(c: &SearchCriteria) -> Option<Predicate> {
    (c.parking_required == Some(true)).then_some(Predicate::ParkingAvailable)
}

fn derive_available_by(c: &SearchCriteria) -> Option<Predicate> {
    c.available_from.map(Predicate::AvailableBy)
}

fn derive_amenities(c: &SearchCriteria) -> Option<Predicate> {
    if c.amenities.is_empty() {
        return None;
    }
    Some(Predicate::HasAllAmenities(normalize_ids(
        c.amenities.iter().copied(),
    )))
}

fn derive_immediately_available(c: &SearchCriteria) -> Option<Predicate> {
    (c.immediately_available == Some(true)).then_some(Predicate::ImmediatelyAvailable)
}

fn derive_furnished(c: &SearchCriteria) -> Option<Predicate> {
    c.furnished.map(Predicate::Furnished)
}

// ---------------------------------------------------------------------------
// LIKE pattern helpers
// ---------------------------------------------------------------------------

/// Escape `\`, `%` and `_` so user text matches literally inside `LIKE`.
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Build a `%text%` containment pattern with the text escaped.
pub fn contains_pattern(text: &str) -> String {
    format!("%{}%", escape_like(text))
}

// ---------------------------------------------------------------------------
// In-memory evaluation
// ---------------------------------------------------------------------------

/// One listing as seen by the search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub status: ListingStatus,
    pub monthly_rent: f64,
    pub immediately_available: bool,
}

impl ListingSnapshot {
    pub fn is_active(&self) -> bool {
        self.status == ListingStatus::Active
    }
}

/// A property with everything the predicates look at, joined in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySnapshot {
    pub id: DbId,
    pub is_active: bool,
    pub property_type_id: DbId,
    pub furnishing_id: Option<DbId>,
    pub furnishing_name: Option<String>,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub total_area_sqft: Option<i32>,
    pub preferred_tenant: Option<PreferredTenant>,
    pub parking_available: bool,
    pub available_from: Option<Date>,
    pub city: String,
    pub locality: String,
    pub street_address: String,
    pub listings: Vec<ListingSnapshot>,
    pub amenity_ids: Vec<DbId>,
}

impl PropertySnapshot {
    /// Base visibility: active property with at least one active listing.
    pub fn is_search_visible(&self) -> bool {
        self.is_active && self.listings.iter().any(ListingSnapshot::is_active)
    }

    fn active_listings(&self) -> impl Iterator<Item = &ListingSnapshot> {
        self.listings.iter().filter(|l| l.is_active())
    }
}

impl Predicate {
    /// Evaluate this predicate against one property.
    pub fn matches(&self, p: &PropertySnapshot) -> bool {
        match self {
            Predicate::Location(text) => {
                let needle = text.to_lowercase();
                [&p.city, &p.locality, &p.street_address]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            Predicate::PropertyType(id) => p.property_type_id == *id,
            Predicate::Furnishing(id) => p.furnishing_id == Some(*id),
            Predicate::Bedrooms(n) => p.bedrooms == *n,
            Predicate::MinBathrooms(n) => p.bathrooms >= *n,
            Predicate::AreaRange { min, max } => match p.total_area_sqft {
                Some(area) => {
                    min.map_or(true, |m| area >= m) && max.map_or(true, |m| area <= m)
                }
                None => false,
            },
            Predicate::RentRange { min, max } => p.active_listings().any(|l| {
                min.map_or(true, |m| l.monthly_rent >= m)
                    && max.map_or(true, |m| l.monthly_rent <= m)
            }),
            Predicate::TenantPreference(requested) => p
                .preferred_tenant
                .is_some_and(|pref| pref.accepts(*requested)),
            Predicate::ParkingAvailable => p.parking_available,
            Predicate::AvailableBy(date) => p.available_from.is_some_and(|d| d <= *date),
            Predicate::HasAllAmenities(ids) => ids.iter().all(|id| p.amenity_ids.contains(id)),
            Predicate::ImmediatelyAvailable => {
                p.active_listings().any(|l| l.immediately_available)
            }
            Predicate::Furnished(furnished) => {
                let names = if *furnished {
                    FURNISHED_NAMES
                } else {
                    UNFURNISHED_NAMES
                };
                p.furnishing_name
                    .as_deref()
                    .is_some_and(|name| names.contains(&name))
            }
        }
    }
}

/// Reference search over in-memory snapshots.
///
/// Applies base visibility and every predicate, orders by id, removes
/// duplicate ids and truncates to `cap`.
#[cfg(test)]
fn filter_snapshots<'a>(
    snapshots: &'a [PropertySnapshot],
    predicates: &[Predicate],
    cap: usize,
) -> Vec<&'a PropertySnapshot> {
    let mut matched: Vec<&PropertySnapshot> = snapshots
        .iter()
        .filter(|p| p.is_search_visible())
        .filter(|p| predicates.iter().all(|pred| pred.matches(p)))
        .collect();
    matched.sort_by_key(|p| p.id);
    matched.dedup_by_key(|p| p.id);
    matched.truncate(cap);
    matched
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
