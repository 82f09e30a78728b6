//! Write `sample.csv` and `sample.xlsx` demo files into the given directory
//! (default: current directory).
//!
//! Both files start with one preamble row, so load them with "Skip Rows" = 1.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

const PRODUCTS: &[&str] = &["Apple", "Pear", "Plum", "Kiwi", "Mango", "Cherry"];
const REGIONS: &[&str] = &["North", "South", "East", "West"];
const ROWS: u32 = 40;

struct Order {
    product: &'static str,
    region: &'static str,
    qty: u32,
    price: f64,
    /// (year, month, day, hour, minute)
    placed: (u16, u8, u8, u16, u8),
    note: Option<&'static str>,
}

fn orders() -> Vec<Order> {
    (0..ROWS)
        .map(|i| Order {
            product: PRODUCTS[(i as usize * 7) % PRODUCTS.len()],
            region: REGIONS[(i as usize * 3) % REGIONS.len()],
            qty: 1 + (i * 13) % 25,
            price: 0.25 * f64::from(1 + (i * 11) % 40),
            placed: (2024, 1 + (i % 12) as u8, 1 + (i * 5 % 28) as u8, (i * 3 % 24) as u16, 30),
            note: if i % 5 == 0 { None } else { Some("ok") },
        })
        .collect()
}

fn write_csv(path: &PathBuf, orders: &[Order]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating sample CSV")?;
    writer.write_record(["Sample order export", "", "", "", "", ""])?;
    writer.write_record(["product", "region", "qty", "price", "placed", "note"])?;
    for o in orders {
        let (y, m, d, h, min) = o.placed;
        writer.write_record([
            o.product.to_string(),
            o.region.to_string(),
            o.qty.to_string(),
            o.price.to_string(),
            format!("{y:04}-{m:02}-{d:02} {h:02}:{min:02}"),
            o.note.unwrap_or("NA").to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &PathBuf, orders: &[Order]) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm");

    sheet.write_string(0, 0, "Sample order export")?;
    for (col, name) in ["product", "region", "qty", "price", "placed", "note"]
        .iter()
        .enumerate()
    {
        sheet.write_string(1, col as u16, *name)?;
    }
    for (i, o) in orders.iter().enumerate() {
        let row = i as u32 + 2;
        let (y, m, d, h, min) = o.placed;
        let placed = ExcelDateTime::from_ymd(y, m, d)?.and_hms(h, min, 0)?;
        sheet.write_string(row, 0, o.product)?;
        sheet.write_string(row, 1, o.region)?;
        sheet.write_number(row, 2, f64::from(o.qty))?;
        sheet.write_number(row, 3, o.price)?;
        sheet.write_datetime_with_format(row, 4, &placed, &date_format)?;
        if let Some(note) = o.note {
            sheet.write_string(row, 5, note)?;
        }
    }
    workbook.save(path).context("saving sample workbook")?;
    Ok(())
}

fn main() -> Result<()> {
    let dir = std::env::args().nth(1).map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let orders = orders();
    let csv_path = dir.join("sample.csv");
    let xlsx_path = dir.join("sample.xlsx");
    write_csv(&csv_path, &orders)?;
    write_xlsx(&xlsx_path, &orders)?;

    println!("Wrote {} and {}", csv_path.display(), xlsx_path.display());
    Ok(())
}
