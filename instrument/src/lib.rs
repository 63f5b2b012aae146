//! Column-oriented recording of `tracing` events from economy runs.
//!
//! Every event target (`restock`, `sale`, `tick`, `build`, ...) becomes a
//! table and every event field becomes a column. The schema is whatever the
//! events carry; nothing is declared up front. Tables convert to polars
//! DataFrames for analysis in tests.
//!
//! # Usage
//!
//! ```ignore
//! // In simulation code:
//! tracing::info!(target: "sale", day, shop_id, product = "simple", price = 300i64);
//!
//! // In a test:
//! let recorder = instrument::record(|| run_days(&mut session, 30));
//! let sales = recorder.dataframe("sale").unwrap()?;
//! ```

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Record};
use tracing::{Event, Id, Metadata, Subscriber};

// === COLUMNS AND TABLES ===

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    U64(Vec<u64>),
    I64(Vec<i64>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::U64(v) => v.len(),
            ColumnData::I64(v) => v.len(),
            ColumnData::F64(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill with type defaults up to `rows` entries.
    fn pad_to(&mut self, rows: usize) {
        match self {
            ColumnData::U64(v) => v.resize(rows.max(v.len()), 0),
            ColumnData::I64(v) => v.resize(rows.max(v.len()), 0),
            ColumnData::F64(v) => v.resize(rows.max(v.len()), 0.0),
            ColumnData::Bool(v) => v.resize(rows.max(v.len()), false),
            ColumnData::Str(v) => v.resize(rows.max(v.len()), String::new()),
        }
    }
}

/// Rows recorded for one event target. All columns hold `rows` entries.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: BTreeMap<String, ColumnData>,
    pub rows: usize,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&ColumnData> {
        self.columns.get(name)
    }

    pub fn u64s(&self, name: &str) -> Option<&[u64]> {
        match self.columns.get(name)? {
            ColumnData::U64(v) => Some(v),
            _ => None,
        }
    }

    pub fn i64s(&self, name: &str) -> Option<&[i64]> {
        match self.columns.get(name)? {
            ColumnData::I64(v) => Some(v),
            _ => None,
        }
    }

    pub fn bools(&self, name: &str) -> Option<&[bool]> {
        match self.columns.get(name)? {
            ColumnData::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn strs(&self, name: &str) -> Option<&[String]> {
        match self.columns.get(name)? {
            ColumnData::Str(v) => Some(v),
            _ => None,
        }
    }

    fn close_row(&mut self) {
        self.rows += 1;
        for column in self.columns.values_mut() {
            column.pad_to(self.rows);
        }
    }
}

/// Tables keyed by tracing target.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub tables: HashMap<String, Table>,
}

impl Recorder {
    pub fn table(&self, target: &str) -> Option<&Table> {
        self.tables.get(target)
    }

    /// Row count for a target, zero if nothing was recorded under it.
    pub fn rows(&self, target: &str) -> usize {
        self.tables.get(target).map_or(0, |t| t.rows)
    }
}

thread_local! {
    static RECORDER: RefCell<Recorder> = RefCell::default();
}

// === SUBSCRIBER ===

/// Writes one event's fields into the current row of a table.
///
/// A field that changes type between events keeps its first type; mismatched
/// values are dropped and the cell is padded with the default.
struct RowWriter<'a> {
    table: &'a mut Table,
}

impl RowWriter<'_> {
    fn column(&mut self, field: &Field, empty: impl FnOnce(usize) -> ColumnData) -> &mut ColumnData {
        let rows = self.table.rows;
        self.table
            .columns
            .entry(field.name().to_string())
            .or_insert_with(|| empty(rows))
    }
}

impl Visit for RowWriter<'_> {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if let ColumnData::U64(v) = self.column(field, |n| ColumnData::U64(vec![0; n])) {
            v.push(value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if let ColumnData::I64(v) = self.column(field, |n| ColumnData::I64(vec![0; n])) {
            v.push(value);
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if let ColumnData::F64(v) = self.column(field, |n| ColumnData::F64(vec![0.0; n])) {
            v.push(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if let ColumnData::Bool(v) = self.column(field, |n| ColumnData::Bool(vec![false; n])) {
            v.push(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if let ColumnData::Str(v) =
            self.column(field, |n| ColumnData::Str(vec![String::new(); n]))
        {
            v.push(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{:?}", value));
    }
}

/// Subscriber that appends every info-or-louder event to the thread's recorder.
pub struct TableSubscriber;

impl Subscriber for TableSubscriber {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.is_event() && *metadata.level() <= tracing::Level::INFO
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let target = event.metadata().target().to_string();

        RECORDER.with(|r| {
            let mut recorder = r.borrow_mut();
            let table = recorder.tables.entry(target).or_default();
            event.record(&mut RowWriter { table: &mut *table });
            table.close_row();
        });
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

// === RECORDING CONTROL ===

/// Install `TableSubscriber` as the process-wide default. Later calls are no-ops.
pub fn install_subscriber() {
    let _ = tracing::subscriber::set_global_default(TableSubscriber);
}

/// Take everything recorded on this thread so far.
pub fn drain() -> Recorder {
    RECORDER.with(|r| std::mem::take(&mut *r.borrow_mut()))
}

pub fn clear() {
    RECORDER.with(|r| *r.borrow_mut() = Recorder::default());
}

/// Run `f` with a thread-scoped `TableSubscriber` and return what it recorded.
///
/// Safe to use from parallel tests: both the subscriber and the recorder are
/// per-thread.
pub fn record(f: impl FnOnce()) -> Recorder {
    clear();
    tracing::subscriber::with_default(TableSubscriber, f);
    drain()
}

// === Polars Integration ===

use polars::prelude::{Column, DataFrame, PolarsResult};

impl Table {
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|(name, data)| match data {
                ColumnData::U64(v) => Column::new(name.as_str().into(), v),
                ColumnData::I64(v) => Column::new(name.as_str().into(), v),
                ColumnData::F64(v) => Column::new(name.as_str().into(), v),
                ColumnData::Bool(v) => Column::new(name.as_str().into(), v),
                ColumnData::Str(v) => Column::new(name.as_str().into(), v),
            })
            .collect();

        DataFrame::new(columns)
    }
}

impl Recorder {
    pub fn dataframe(&self, target: &str) -> Option<PolarsResult<DataFrame>> {
        self.tables.get(target).map(Table::to_dataframe)
    }

    pub fn to_dataframes(&self) -> HashMap<String, DataFrame> {
        self.tables
            .iter()
            .filter_map(|(name, table)| table.to_dataframe().ok().map(|df| (name.clone(), df)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_become_rows() {
        let recorder = record(|| {
            tracing::info!(target: "sale", day = 1u64, shop_id = 0u32, product = "simple", price = 300i64);
            tracing::info!(target: "sale", day = 1u64, shop_id = 1u32, product = "deluxe", price = 500i64);
            tracing::info!(target: "tick", day = 1u64, income = 800i64);
        });

        assert_eq!(recorder.rows("sale"), 2);
        assert_eq!(recorder.rows("tick"), 1);
        assert_eq!(recorder.rows("restock"), 0);

        let sales = recorder.table("sale").unwrap();
        assert_eq!(sales.u64s("shop_id"), Some(&[0, 1][..]));
        assert_eq!(sales.i64s("price"), Some(&[300, 500][..]));
        assert_eq!(
            sales.strs("product").unwrap(),
            &["simple".to_string(), "deluxe".to_string()]
        );
    }

    #[test]
    fn test_missing_fields_are_padded() {
        let recorder = record(|| {
            tracing::info!(target: "restock", shop_id = 0u32, restocked = true, cost = 1000i64);
            tracing::info!(target: "restock", shop_id = 1u32, restocked = false);
            tracing::info!(target: "restock", shop_id = 2u32, note = "late column");
        });

        let table = recorder.table("restock").unwrap();
        assert_eq!(table.rows, 3);
        for column in table.columns.values() {
            assert_eq!(column.len(), 3);
        }
        assert_eq!(table.i64s("cost"), Some(&[1000, 0, 0][..]));
        assert_eq!(table.bools("restocked"), Some(&[true, false, false][..]));
        assert_eq!(table.strs("note").unwrap()[0], "");
        assert_eq!(table.strs("note").unwrap()[2], "late column");
    }

    #[test]
    fn test_debug_level_is_ignored() {
        let recorder = record(|| {
            tracing::debug!(target: "tick", day = 1u64);
            tracing::warn!(target: "restock_config", product = "katsu");
        });
        assert_eq!(recorder.rows("tick"), 0);
        assert_eq!(recorder.rows("restock_config"), 1);
    }

    #[test]
    fn test_type_change_keeps_first_type() {
        let recorder = record(|| {
            tracing::info!(target: "restock", amount = 5u64);
            tracing::info!(target: "restock", amount = "five");
        });

        let table = recorder.table("restock").unwrap();
        assert_eq!(table.u64s("amount"), Some(&[5, 0][..]));
        assert!(table.strs("amount").is_none());
    }

    #[test]
    fn test_dataframe_conversion() {
        let recorder = record(|| {
            tracing::info!(target: "tick", day = 1u64, income = 300i64);
            tracing::info!(target: "tick", day = 2u64, income = 0i64);
        });

        let df = recorder.dataframe("tick").unwrap().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
        let income: Vec<i64> = df
            .column("income")
            .unwrap()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(income, vec![300, 0]);
        assert!(recorder.dataframe("sale").is_none());
    }
}
