//! Data models for statement processing
//!
//! This module contains the canonical record types produced by the section
//! parser. The three record shapes (section marker, order, amendment) are a
//! tagged union so that "which fields are meaningful" is a compile-time fact
//! rather than a convention over one wide nullable struct.

use serde_json::{json, Map, Value};

use crate::constants::{issues, sections};

// =============================================================================
// Derived Tags
// =============================================================================

/// Event classification derived from a row's status or enclosing section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Order executed
    Fill,
    /// Order canceled or rejected
    Cancel,
    /// Order still working at export time
    Working,
    /// Amendment sub-row
    Amend,
    /// Anything else
    Other,
}

impl EventType {
    /// Derive from an explicit status value (policy (a) of the builder)
    pub fn from_status(status: &str) -> Self {
        if status == "FILLED" {
            EventType::Fill
        } else if status == "CANCELED" || status.starts_with("REJECTED") {
            EventType::Cancel
        } else {
            EventType::Other
        }
    }

    /// Derive from the enclosing section's canonical name (policy (b))
    pub fn from_section(section: &str) -> Self {
        match section {
            s if s == sections::FILLED => EventType::Fill,
            s if s == sections::CANCELED => EventType::Cancel,
            s if s == sections::WORKING => EventType::Working,
            _ => EventType::Other,
        }
    }

    /// Wire tag for the flat output schema
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Fill => "fill",
            EventType::Cancel => "cancel",
            EventType::Working => "working",
            EventType::Amend => "amend",
            EventType::Other => "other",
        }
    }
}

/// Asset classification derived from a row's type token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    /// CALL or PUT type token
    Option,
    /// STOCK type token
    Stock,
    /// ETF type token
    Etf,
}

impl AssetType {
    /// Derive from the uppercased type token; unknown tokens map to `None`
    pub fn from_type_token(token: &str) -> Option<Self> {
        match token {
            "CALL" | "PUT" => Some(AssetType::Option),
            "STOCK" => Some(AssetType::Stock),
            "ETF" => Some(AssetType::Etf),
            _ => None,
        }
    }

    /// Wire tag for the flat output schema
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Option => "OPTION",
            AssetType::Stock => "STOCK",
            AssetType::Etf => "ETF",
        }
    }
}

// =============================================================================
// Field Types
// =============================================================================

/// A parsed quantity.
///
/// Malformed quantity strings are retained verbatim rather than coerced to
/// null, so no value is silently dropped; the accompanying issue token marks
/// the parse failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Qty {
    /// Parsed integer quantity (signed or absolute per configuration)
    Count(i64),
    /// Original trimmed text of an unparsable quantity cell
    Raw(String),
}

impl Qty {
    /// JSON rendering: numbers stay numbers, raw fallbacks stay strings
    pub fn to_json(&self) -> Value {
        match self {
            Qty::Count(n) => json!(n),
            Qty::Raw(s) => json!(s),
        }
    }
}

/// Option contract fields present when a row's type token is CALL or PUT
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptionLeg {
    /// Normalized expiry date (ISO calendar date)
    pub exp_date: Option<String>,

    /// Strike price
    pub strike: Option<f64>,

    /// Contract right, "CALL" or "PUT"
    pub right: Option<String>,
}

impl OptionLeg {
    fn to_json(&self) -> Value {
        json!({
            "exp_date": self.exp_date,
            "strike": self.strike,
            "right": self.right,
        })
    }
}

/// Revised order terms carried by an amendment sub-row
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AmendmentDetail {
    /// Reference number linking the amendment to its order
    pub reference: Option<String>,

    /// Revised stop price (first bare numeric cell in the row)
    pub stop_price: Option<f64>,

    /// Revised order type token, if any
    pub order_type: Option<String>,

    /// Revised time-in-force token, if any
    pub tif: Option<String>,
}

impl AmendmentDetail {
    fn to_json(&self) -> Value {
        json!({
            "ref": self.reference,
            "stop_price": self.stop_price,
            "order_type": self.order_type,
            "tif": self.tif,
        })
    }
}

/// Provenance tag attached to records during batch processing
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Base name of the originating file
    pub name: String,

    /// 0-based position of the file in the batch list
    pub index: usize,
}

// =============================================================================
// Record Variants
// =============================================================================

/// Marker record for a section boundary or column-header row
#[derive(Debug, Clone, PartialEq)]
pub struct SectionMarker {
    /// Canonical section name in effect
    pub section: String,

    /// 1-based source row index
    pub row_index: usize,

    /// Verbatim original row text
    pub raw: String,

    /// Batch provenance, absent for single-file runs
    pub source: Option<SourceFile>,
}

/// Canonical order record produced from one admissible data row
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub section: String,
    pub row_index: usize,
    pub raw: String,
    pub issues: Vec<String>,

    /// Execution time; populated in filled-order sections
    pub exec_time: Option<String>,

    /// Cancellation time; populated in canceled-order sections
    pub time_canceled: Option<String>,

    /// Placement time; populated in working-order sections
    pub time_placed: Option<String>,

    pub side: Option<String>,
    pub qty: Option<Qty>,
    pub pos_effect: Option<String>,
    pub symbol: Option<String>,

    /// Expiry cell as seen on the row (normalized form lives in `option`)
    pub exp: Option<String>,

    pub strike: Option<f64>,

    /// Instrument type token (CALL, PUT, STOCK, ETF, ...)
    pub type_code: Option<String>,

    pub spread: Option<String>,
    pub price: Option<f64>,
    pub net_price: Option<f64>,
    pub price_improvement: Option<f64>,
    pub order_type: Option<String>,
    pub tif: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub mark: Option<f64>,

    /// Derived event classification
    pub event_type: EventType,

    /// Derived asset classification, `None` when the type token is unknown
    pub asset_type: Option<AssetType>,

    /// Option contract sub-structure, present for CALL/PUT rows
    pub option: Option<OptionLeg>,

    pub source: Option<SourceFile>,
}

/// Amendment record refining the immediately preceding order row
#[derive(Debug, Clone, PartialEq)]
pub struct AmendmentRecord {
    pub section: String,
    pub row_index: usize,
    pub raw: String,
    pub issues: Vec<String>,

    /// Captured amendment terms
    pub amendment: AmendmentDetail,

    pub source: Option<SourceFile>,
}

/// A canonical record emitted by the section parser
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// Section boundary or column-header marker
    SectionMarker(SectionMarker),
    /// Order data row
    Order(OrderRecord),
    /// Amendment sub-row
    Amendment(AmendmentRecord),
}

impl Record {
    /// Canonical section name this record belongs to
    pub fn section(&self) -> &str {
        match self {
            Record::SectionMarker(m) => &m.section,
            Record::Order(o) => &o.section,
            Record::Amendment(a) => &a.section,
        }
    }

    /// 1-based source row index
    pub fn row_index(&self) -> usize {
        match self {
            Record::SectionMarker(m) => m.row_index,
            Record::Order(o) => o.row_index,
            Record::Amendment(a) => a.row_index,
        }
    }

    /// Verbatim original row text
    pub fn raw(&self) -> &str {
        match self {
            Record::SectionMarker(m) => &m.raw,
            Record::Order(o) => &o.raw,
            Record::Amendment(a) => &a.raw,
        }
    }

    /// True for section/header marker records
    pub fn is_marker(&self) -> bool {
        matches!(self, Record::SectionMarker(_))
    }

    /// Best-available timestamp for in-section ordering: execution time,
    /// then cancellation time, then placement time. Markers and amendments
    /// carry none.
    pub fn timestamp(&self) -> Option<&str> {
        match self {
            Record::Order(o) => o
                .exec_time
                .as_deref()
                .or(o.time_canceled.as_deref())
                .or(o.time_placed.as_deref()),
            _ => None,
        }
    }

    /// Attach batch provenance
    pub fn set_source(&mut self, source: SourceFile) {
        match self {
            Record::SectionMarker(m) => m.source = Some(source),
            Record::Order(o) => o.source = Some(source),
            Record::Amendment(a) => a.source = Some(source),
        }
    }

    /// Render the unified flat output object.
    ///
    /// Every key of the unified schema is present on every record; fields
    /// that do not apply to a variant are null. Marker records carry the
    /// literal `section_header` issue tag.
    pub fn to_flat_json(&self) -> Value {
        let mut obj = Map::new();
        obj.insert("section".into(), json!(self.section()));
        obj.insert("row_index".into(), json!(self.row_index()));

        match self {
            Record::SectionMarker(_) => {
                fill_null_order_fields(&mut obj);
                obj.insert("event_type".into(), Value::Null);
                obj.insert("asset_type".into(), Value::Null);
                obj.insert("option".into(), Value::Null);
                obj.insert("amendment".into(), Value::Null);
                obj.insert("raw".into(), json!(self.raw()));
                obj.insert("issues".into(), json!([issues::SECTION_HEADER]));
            }
            Record::Order(o) => {
                obj.insert("exec_time".into(), json!(o.exec_time));
                obj.insert("time_canceled".into(), json!(o.time_canceled));
                obj.insert("time_placed".into(), json!(o.time_placed));
                obj.insert("side".into(), json!(o.side));
                obj.insert(
                    "qty".into(),
                    o.qty.as_ref().map(Qty::to_json).unwrap_or(Value::Null),
                );
                obj.insert("pos_effect".into(), json!(o.pos_effect));
                obj.insert("symbol".into(), json!(o.symbol));
                obj.insert("exp".into(), json!(o.exp));
                obj.insert("strike".into(), json!(o.strike));
                obj.insert("type".into(), json!(o.type_code));
                obj.insert("spread".into(), json!(o.spread));
                obj.insert("price".into(), json!(o.price));
                obj.insert("net_price".into(), json!(o.net_price));
                obj.insert("price_improvement".into(), json!(o.price_improvement));
                obj.insert("order_type".into(), json!(o.order_type));
                obj.insert("tif".into(), json!(o.tif));
                obj.insert("status".into(), json!(o.status));
                obj.insert("notes".into(), json!(o.notes));
                obj.insert("mark".into(), json!(o.mark));
                obj.insert("event_type".into(), json!(o.event_type.as_str()));
                obj.insert(
                    "asset_type".into(),
                    o.asset_type
                        .map(|a| json!(a.as_str()))
                        .unwrap_or(Value::Null),
                );
                obj.insert(
                    "option".into(),
                    o.option
                        .as_ref()
                        .map(OptionLeg::to_json)
                        .unwrap_or(Value::Null),
                );
                obj.insert("amendment".into(), Value::Null);
                obj.insert("raw".into(), json!(o.raw));
                obj.insert("issues".into(), json!(o.issues));
            }
            Record::Amendment(a) => {
                fill_null_order_fields(&mut obj);
                obj.insert("event_type".into(), json!(EventType::Amend.as_str()));
                obj.insert("asset_type".into(), Value::Null);
                obj.insert("option".into(), Value::Null);
                obj.insert("amendment".into(), a.amendment.to_json());
                obj.insert("raw".into(), json!(a.raw));
                obj.insert("issues".into(), json!(a.issues));
            }
        }

        let source = match self {
            Record::SectionMarker(m) => m.source.as_ref(),
            Record::Order(o) => o.source.as_ref(),
            Record::Amendment(a) => a.source.as_ref(),
        };
        if let Some(src) = source {
            obj.insert("source_file".into(), json!(src.name));
            obj.insert("source_file_index".into(), json!(src.index));
        }

        Value::Object(obj)
    }
}

/// Insert the typed order fields as nulls, preserving the unified key order
fn fill_null_order_fields(obj: &mut Map<String, Value>) {
    for key in [
        "exec_time",
        "time_canceled",
        "time_placed",
        "side",
        "qty",
        "pos_effect",
        "symbol",
        "exp",
        "strike",
        "type",
        "spread",
        "price",
        "net_price",
        "price_improvement",
        "order_type",
        "tif",
        "status",
        "notes",
        "mark",
    ] {
        obj.insert(key.into(), Value::Null);
    }
}

impl OrderRecord {
    /// Construct an empty order record envelope for one source row
    pub fn new(section: impl Into<String>, row_index: usize, raw: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            row_index,
            raw: raw.into(),
            issues: Vec::new(),
            exec_time: None,
            time_canceled: None,
            time_placed: None,
            side: None,
            qty: None,
            pos_effect: None,
            symbol: None,
            exp: None,
            strike: None,
            type_code: None,
            spread: None,
            price: None,
            net_price: None,
            price_improvement: None,
            order_type: None,
            tif: None,
            status: None,
            notes: None,
            mark: None,
            event_type: EventType::Other,
            asset_type: None,
            option: None,
            source: None,
        }
    }
}
