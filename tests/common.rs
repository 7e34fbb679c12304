// Shared sheet fixtures for integration tests
#![allow(dead_code)]

use calamine::{Data, Range};
use vehicle_report_ingest::extract::table::range_from_rows;
use vehicle_report_ingest::models::{DatasetKind, MONTH_LABELS};
use vehicle_report_ingest::profile::{
    CategoryLabelSet, ExtractionProfile, HeaderMarker, MonthLayout,
};

pub fn s(text: &str) -> Data {
    Data::String(text.to_string())
}

pub fn f(value: f64) -> Data {
    Data::Float(value)
}

/// Label cell(s) followed by twelve numeric month cells
pub fn data_row(labels: &[Data], values: [f64; 12]) -> Vec<Data> {
    let mut row = labels.to_vec();
    row.extend(values.iter().map(|v| f(*v)));
    row
}

pub fn noise_rows(n: usize) -> Vec<Vec<Data>> {
    (0..n)
        .map(|i| match i % 3 {
            0 => vec![s("ANFAVEA - Associação Nacional dos Fabricantes")],
            1 => vec![Data::Empty],
            _ => vec![s(&format!("Nota {i}: dados sujeitos a revisão"))],
        })
        .collect()
}

pub fn series(f: impl Fn(usize) -> f64) -> [f64; 12] {
    std::array::from_fn(f)
}

/// English-labelled registrations profile with a one-row header on the marker row
pub fn registrations_profile() -> ExtractionProfile {
    ExtractionProfile {
        kind: DatasetKind::Sales,
        sheet_name: "Registrations".to_string(),
        markers: vec![HeaderMarker::phrase("Total Registrations")],
        header_row_offset: 0,
        header_rows: 1,
        month_layout: MonthLayout::ByName,
        light: CategoryLabelSet::new(
            &["automobiles", "light commercial"],
            &["Automobiles", "Light Commercial"],
        ),
        heavy: CategoryLabelSet::new(&["trucks", "buses"], &["Trucks", "Buses"]),
    }
}

/// Registrations sheet with the header on row 10
///
/// Light rows sum to 100, 120, 140, ... and heavy rows to 10, 12, 14, ...
pub fn registrations_sheet() -> Range<Data> {
    let mut rows = noise_rows(10);
    let mut header = vec![s("Total Registrations")];
    header.extend(
        [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ]
        .iter()
        .map(|m| s(m)),
    );
    header.push(s("Total"));
    rows.push(header);

    rows.push(data_row(
        &[s("Automobiles")],
        series(|i| 70.0 + 15.0 * i as f64),
    ));
    rows.push(data_row(&[s("Motorcycles")], series(|_| 999.0)));
    rows.push(data_row(
        &[s("Light Commercial")],
        series(|i| 30.0 + 5.0 * i as f64),
    ));
    rows.push(data_row(&[s("Trucks")], series(|i| 8.0 + 2.0 * i as f64)));
    rows.push(data_row(&[s("Buses")], series(|_| 2.0)));
    rows.push(vec![s("Fonte: Renavam")]);

    range_from_rows(rows)
}

pub fn expected_light() -> [f64; 12] {
    series(|i| 100.0 + 20.0 * i as f64)
}

pub fn expected_heavy() -> [f64; 12] {
    series(|i| 10.0 + 2.0 * i as f64)
}

/// "I. Emplacamento" laid out like the yearly workbooks: title, blank rows, a
/// two-row header and unlabeled group/segment columns
pub fn emplacamento_sheet(light: [f64; 12], heavy_trucks: [f64; 12], heavy_buses: [f64; 12]) -> Range<Data> {
    let mut rows = noise_rows(5);
    rows.push(vec![Data::Empty, s("Emplacamento Total de Autoveículos")]);
    rows.push(vec![Data::Empty]);
    rows.push(vec![Data::Empty]);

    let mut upper = vec![Data::Empty, Data::Empty, s("2024")];
    upper.extend((0..11).map(|_| Data::Empty));
    upper.push(s("Acumulado"));
    rows.push(upper);

    let mut lower = vec![Data::Empty, Data::Empty];
    lower.extend(MONTH_LABELS.iter().map(|m| s(m)));
    lower.push(Data::Empty);
    rows.push(lower);

    let half: [f64; 12] = light.map(|v| v / 2.0);
    rows.push(data_row(&[s("Leves"), s("Automóveis")], half));
    rows.push(data_row(&[Data::Empty, s(" Comerciais leves ")], half));
    rows.push(data_row(&[s("Pesados"), s("Caminhões")], heavy_trucks));
    rows.push(data_row(&[Data::Empty, s("Ônibus")], heavy_buses));
    rows.push(data_row(&[s("Total"), Data::Empty], series(|_| 1e9)));

    range_from_rows(rows)
}

/// "VI. Produção" with a "Unidades" header and months anchored at the year column
pub fn producao_sheet(year: &str, light: [f64; 12], heavy: [f64; 12]) -> Range<Data> {
    let mut rows = noise_rows(4);
    rows.push(vec![s("Produção de autoveículos por segmento")]);

    let mut header = vec![s("Unidades"), s(year)];
    header.extend((0..11).map(|_| Data::Empty));
    header.push(s("Total"));
    rows.push(header);

    rows.push(data_row(&[s("Automóveis")], light));
    rows.push(data_row(&[s("Comerciais leves")], series(|_| 0.0)));
    rows.push(data_row(&[s("Caminhões")], series(|_| 123.0)));
    rows.push(data_row(&[s("Semileves")], heavy.map(|v| v / 4.0)));
    rows.push(data_row(&[s("Leves")], heavy.map(|v| v / 4.0)));
    rows.push(data_row(&[s("Semipesados")], heavy.map(|v| v / 4.0)));
    rows.push(data_row(&[s("Urbano")], heavy.map(|v| v / 4.0)));

    range_from_rows(rows)
}
