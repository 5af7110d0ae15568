//! Fixtures shared by unit tests.

use std::io::Cursor;

use crate::workbook::{Sheet, Workbook};

/// Write sheets (name, row-major texts) to an in-memory xlsx document.
pub fn xlsx_bytes(sheets: &[(&str, Vec<Vec<&str>>)]) -> Vec<u8> {
    let mut book = umya_spreadsheet::new_file_empty_worksheet();
    for (name, rows) in sheets {
        let worksheet = book.new_sheet(*name).expect("new sheet");
        for (r, row) in rows.iter().enumerate() {
            for (c, text) in row.iter().enumerate() {
                if !text.is_empty() {
                    worksheet
                        .get_cell_mut((c as u32 + 1, r as u32 + 1))
                        .set_value(*text);
                }
            }
        }
    }
    let mut cursor = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(&book, &mut cursor).expect("write workbook");
    cursor.into_inner()
}

/// Roster sheet with the columns used by [`event_schema`].
pub fn roster_sheet(rows: Vec<Vec<&str>>) -> Sheet {
    let mut all = vec![vec!["2024 Selection ID", "First Name", "Last Name", "Email", "Age"]];
    all.extend(rows);
    Sheet::from_rows("ClassSelection", all)
}

/// Period sheet with the columns used by [`event_schema`].
pub fn period_sheet(name: &str, rows: Vec<Vec<&str>>) -> Sheet {
    let mut all = vec![vec![
        "2024 Selection ID",
        "First Name",
        "Last Name",
        "Choice Number",
        "2024 Registration ID",
        "Workshops Days 1-4",
        "Workshops Days 1-2",
    ]];
    all.extend(rows);
    Sheet::from_rows(name, all)
}

pub fn workbook(sheets: Vec<Sheet>) -> Workbook {
    Workbook::new(sheets)
}

/// Schema with one roster sheet and the given period sheets.
pub fn event_schema(periods: &[&str]) -> crate::schema::Schema {
    let period_sheets: Vec<_> = periods
        .iter()
        .map(|name| {
            serde_json::json!({
                "sheetName": name,
                "displayName": "",
                "columns": {
                    "selectionId": { "pattern": "Selection ID" },
                    "firstName": "First Name",
                    "lastName": "Last Name",
                    "choiceNumber": "Choice Number",
                    "registrationId": { "pattern": "Registration ID" }
                },
                "workshopColumns": [
                    { "columnName": "Workshops Days 1-4", "startDay": 1, "endDay": 4 },
                    { "columnName": "Workshops Days 1-2", "startDay": 1, "endDay": 2 }
                ]
            })
        })
        .collect();

    let document = serde_json::json!({
        "eventName": "Test Camp",
        "totalDays": 4,
        "classSelectionSheet": {
            "sheetName": "ClassSelection",
            "columns": {
                "selectionId": { "pattern": "Selection ID" },
                "firstName": "First Name",
                "lastName": "Last Name",
                "email": "Email",
                "age": "Age"
            }
        },
        "periodSheets": period_sheets
    });

    crate::schema::load_schema(
        document.to_string().as_bytes(),
        "test-schema.json",
        &crate::diagnostics::NullSink,
    )
    .expect("test schema")
}
