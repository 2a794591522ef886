use std::collections::BTreeSet;

use chrono::{Local, NaiveDate};

use crate::bridge::Bridge;
use crate::chart::Chart;
use crate::models::{strip_commas, Entry, EntryRequest};

pub const ALL_EXERCISES: &str = "all";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the raw store text. The first line is the header; lines with fewer
/// than three fields are skipped. A weight that does not parse becomes NaN.
pub fn parse(raw: &str) -> Vec<Entry> {
    raw.trim()
        .lines()
        .skip(1)
        .filter_map(|line| {
            let mut fields = line.split(',');
            let date = fields.next()?;
            let exercise = fields.next()?;
            let weight = fields.next()?;
            Some(Entry {
                date: date.to_string(),
                exercise: exercise.to_string(),
                weight: parse_weight(weight),
            })
        })
        .collect()
}

/// Reads the leading number of a weight field and ignores whatever trails it,
/// so a hand-edited `100kg` still reads as 100. No leading number gives NaN.
pub fn parse_weight(field: &str) -> f64 {
    let text = field.trim_start();
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

/// Form weight text as a number input would hand it over: anything that is
/// not a finite number becomes empty.
fn normalize_weight(text: &str) -> String {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => text.trim().to_string(),
        _ => String::new(),
    }
}

pub fn distinct_exercises(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.exercise.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// `"all"` or an empty request falls back to the first exercise, if any.
/// Anything else is used as-is, even when nothing matches it.
pub fn select_exercise(requested: &str, available: &[String]) -> String {
    if requested == ALL_EXERCISES || requested.is_empty() {
        if let Some(first) = available.first() {
            return first.clone();
        }
    }
    requested.to_string()
}

pub fn filter_and_sort(entries: &[Entry], exercise: &str) -> Vec<Entry> {
    let mut filtered: Vec<Entry> = entries
        .iter()
        .filter(|entry| entry.exercise == exercise)
        .cloned()
        .collect();
    // stable: same-day entries keep append order, unparseable dates go first
    filtered.sort_by_key(|entry| NaiveDate::parse_from_str(&entry.date, DATE_FORMAT).ok());
    filtered
}

/// Known exercises matching what has been typed so far, for the exercise
/// input's suggestion list. An exact match needs no suggestion.
pub fn suggest<'a>(exercises: &'a [String], typed: &str) -> Vec<&'a String> {
    let needle = typed.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    exercises
        .iter()
        .filter(|name| name.as_str() != typed && name.to_lowercase().contains(&needle))
        .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct EntryForm {
    pub date: NaiveDate,
    pub exercise: String,
    pub weight: String,
}

impl Default for EntryForm {
    fn default() -> Self {
        EntryForm {
            date: Local::now().date_naive(),
            exercise: String::new(),
            weight: String::new(),
        }
    }
}

impl EntryForm {
    fn to_request(&self) -> EntryRequest {
        EntryRequest {
            date: self.date.format(DATE_FORMAT).to_string(),
            exercise: self.exercise.clone(),
            weight: normalize_weight(&self.weight),
        }
    }
}

/// Presentation state: the form, the exercise filter and the live chart.
/// Talks to the store only through the injected bridge.
pub struct ProgressView {
    bridge: Box<dyn Bridge>,
    pub form: EntryForm,
    pub filter: String,
    exercises: Vec<String>,
    chart: Option<Chart>,
}

impl ProgressView {
    pub fn new(bridge: Box<dyn Bridge>) -> Self {
        ProgressView {
            bridge,
            form: EntryForm::default(),
            filter: ALL_EXERCISES.to_string(),
            exercises: Vec::new(),
            chart: None,
        }
    }

    pub fn exercises(&self) -> &[String] {
        &self.exercises
    }

    pub fn chart(&self) -> Option<&Chart> {
        self.chart.as_ref()
    }

    pub fn load_and_render(&mut self, specific: Option<&str>) {
        let response = self.bridge.get_data();
        if !response.success {
            tracing::error!(
                "Failed to load data: {}",
                response.error.unwrap_or_default()
            );
            return;
        }

        let entries = parse(response.data.as_deref().unwrap_or_default());
        self.exercises = distinct_exercises(&entries);

        let requested = specific.unwrap_or(self.filter.as_str());
        let current = select_exercise(requested, &self.exercises);
        self.filter = current.clone();

        let ordered = filter_and_sort(&entries, &current);
        self.render(&ordered, &current);
    }

    pub fn render(&mut self, ordered: &[Entry], label: &str) {
        if let Some(old) = self.chart.take() {
            tracing::debug!("Disposing chart for {}", old.label);
        }
        if ordered.is_empty() {
            return;
        }
        self.chart = Chart::build(ordered, label);
    }

    /// Saves the form. On failure the returned message is meant for a
    /// blocking alert and the form is left as it was.
    pub fn on_submit(&mut self) -> Result<(), String> {
        let request = self.form.to_request();
        let response = self.bridge.save_entry(&request);
        if !response.success {
            return Err(format!(
                "Error saving data: {}",
                response.error.unwrap_or_default()
            ));
        }

        let saved = strip_commas(&request.exercise);
        tracing::info!("Logged {} {} on {}", saved, request.weight, request.date);
        self.filter = saved.clone();
        self.load_and_render(Some(saved.as_str()));
        self.form.weight.clear();
        Ok(())
    }

    pub fn on_filter_change(&mut self, exercise: &str) {
        self.filter = exercise.to_string();
        self.load_and_render(Some(exercise));
    }
}
