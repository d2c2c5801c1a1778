//! End-to-end layout tests: fragments in, flattened records out, on the
//! full six-column register layout the crate targets by default.

use da_register::fragment::{Page, TextFragment};
use da_register::layout::reconstruct_table;
use da_register::record::Application;
use da_register::TableConfig;

use chrono::NaiveDate;
use proptest::prelude::*;

// Column grid of the synthetic register. Index 2 is the key column,
// matching `TableConfig::default()`.
const XS: [f64; 6] = [20.0, 80.0, 200.0, 260.0, 330.0, 400.0];

/// One full register row: six cells at the fixed grid, ten units below
/// the previous row (the key column repeats every row, so the adaptive
/// tolerance settles at the 10-unit line pitch).
fn register_row(page: u32, y: f64, cols: [&str; 6]) -> Vec<TextFragment> {
    XS.iter()
        .zip(cols)
        .map(|(&x, text)| TextFragment::new(page, x, y, text))
        .collect()
}

fn register_page(page: u32, rows: Vec<Vec<TextFragment>>) -> Page {
    Page::new(rows.into_iter().flatten().collect())
}

#[test]
fn full_register_round_trip() {
    // Title and column-header rows mirror the real register: the header
    // row's first visible cell is "Address" (nothing is printed in the
    // leftmost column on header lines).
    let header: Vec<TextFragment> = XS[1..]
        .iter()
        .zip(["Address", "App No", "Received", "Status", "Reason"])
        .map(|(&x, text)| TextFragment::new(1, x, 50.0, text))
        .collect();
    let page = register_page(
        1,
        vec![
            vec![TextFragment::new(1, XS[0], 40.0, "Development Application Register 2018")],
            header,
            register_row(
                1,
                60.0,
                ["1", "123 Smith St", "17/67", "3/07/2018", "Approved", "Dwelling"],
            ),
            register_row(
                1,
                70.0,
                ["2", "9 Jones Rd", "17/68", "12/07/2018", "Pending", "Shed"],
            ),
        ],
    );

    let out = reconstruct_table(&[page], &TableConfig::default());
    assert_eq!(out.records.len(), 2);
    assert!(out.unmatched.is_empty());
    assert_eq!(
        out.records[0],
        vec!["1", "123 Smith St", "17/67", "3/07/2018", "Approved", "Dwelling"]
    );

    let scraped = NaiveDate::from_ymd_opt(2018, 7, 14).unwrap();
    let app = Application::from_record(&out.records[0], scraped).unwrap();
    assert_eq!(app.council_reference, "17/67");
    assert_eq!(app.address, "123 Smith St");
    assert_eq!(app.date_received, "2018-07-03");
    assert_eq!(app.reason, "Dwelling");
}

#[test]
fn wrapped_cells_merge_and_record_spans_page_break() {
    // Record 17/68's address and reason wrap; the reason's second line
    // lands at the top of page 2.
    let page1 = register_page(
        1,
        vec![
            register_row(
                1,
                60.0,
                ["1", "123 Smith St", "17/67", "3/07/2018", "Approved", "Dwelling"],
            ),
            register_row(
                1,
                70.0,
                ["2", "45 Long Meadow", "17/68", "12/07/2018", "Pending", "Alterations to"],
            ),
            vec![
                TextFragment::new(1, XS[1], 80.0, "Road (Lot 3)"),
                // Key column must repeat on continuation-bearing pages
                // for tolerance; a second record row provides it below.
            ],
            register_row(
                1,
                90.0,
                ["3", "7 West St", "17/69", "13/07/2018", "Pending", "Garage"],
            ),
        ],
    );
    let page2 = Page::new(vec![TextFragment::new(2, XS[5], 30.0, "existing garage")]);

    let out = reconstruct_table(&[page1, page2], &TableConfig::default());
    assert_eq!(out.records.len(), 3);
    assert_eq!(out.records[1][1], "45 Long Meadow\nRoad (Lot 3)");
    // Page-break continuation attaches to the last key row of page 1.
    assert_eq!(out.records[2][5], "Garage\nexisting garage");
    assert!(out.unmatched.is_empty());
}

#[test]
fn misaligned_continuation_is_reported_not_fatal() {
    let page = register_page(
        1,
        vec![
            register_row(
                1,
                60.0,
                ["1", "123 Smith St", "17/67", "3/07/2018", "Approved", "Dwelling"],
            ),
            vec![TextFragment::new(1, 999.0, 70.0, "floating annotation")],
            register_row(
                1,
                80.0,
                ["2", "9 Jones Rd", "17/68", "12/07/2018", "Pending", "Shed"],
            ),
            // Third row pins the adaptive tolerance at the 10-unit pitch.
            register_row(
                1,
                90.0,
                ["3", "7 West St", "17/69", "13/07/2018", "Pending", "Garage"],
            ),
        ],
    );

    let out = reconstruct_table(&[page], &TableConfig::default());
    assert_eq!(out.records.len(), 3);
    assert_eq!(out.unmatched.len(), 1);
    assert_eq!(out.unmatched[0].record_key, "17/67");
    assert_eq!(out.unmatched[0].text, "floating annotation");
    // The record itself is untouched.
    assert_eq!(
        out.records[0],
        vec!["1", "123 Smith St", "17/67", "3/07/2018", "Approved", "Dwelling"]
    );
}

#[test]
fn empty_document_yields_no_records() {
    let out = reconstruct_table(&[Page::default()], &TableConfig::default());
    assert!(out.records.is_empty());
    assert!(out.unmatched.is_empty());
    let out = reconstruct_table(&[], &TableConfig::default());
    assert!(out.records.is_empty());
}

proptest! {
    /// With all X values distinct the adaptive tolerance is zero, so
    /// every fragment must end up in a row of its own.
    #[test]
    fn unique_x_fragments_each_get_their_own_row(
        ys in proptest::collection::vec(0.0_f64..1000.0, 1..40)
    ) {
        let fragments: Vec<TextFragment> = ys
            .iter()
            .enumerate()
            .map(|(i, &y)| TextFragment::new(1, i as f64, y, "cell"))
            .collect();

        prop_assert_eq!(da_register::layout::page_tolerance(&fragments), 0.0);
        let rows = da_register::assemble_rows(&fragments);
        prop_assert_eq!(rows.len(), fragments.len());
    }
}
