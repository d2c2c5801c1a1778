//! Decoding PDF bytes into positioned text fragments.
//!
//! Walks each page's content stream with lopdf, tracking the text and
//! line matrices, and emits one [`TextFragment`] per text-showing
//! operator. A `TJ` array keeps its string elements as separate runs so
//! internally multi-segment fragments survive into layout analysis.
//!
//! Coordinates are converted to a top-left origin (Y flipped against the
//! page height) so that ascending `y` is reading order, which is what
//! the layout stage expects.

use std::collections::BTreeMap;

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};

use crate::error::{Error, Result};
use crate::fragment::{Page, TextFragment};

// Fallback when a page has no resolvable MediaBox (A4 height in points).
const DEFAULT_PAGE_HEIGHT: f64 = 842.0;

/// Decodes a PDF document into per-page text fragments.
///
/// Fails on malformed documents; callers must treat that as aborting
/// the whole run rather than persisting partial results.
pub fn decode(bytes: &[u8]) -> Result<Vec<Page>> {
    let doc = Document::load_mem(bytes)?;
    let mut pages = Vec::new();

    for (page_num, page_id) in doc.get_pages() {
        let fragments = decode_page(&doc, page_id, page_num)?;
        log::debug!("Page {page_num}: {} text fragments", fragments.len());
        pages.push(Page::new(fragments));
    }

    Ok(pages)
}

/// Decodes one page's content stream into fragments.
fn decode_page(doc: &Document, page_id: ObjectId, page_num: u32) -> Result<Vec<TextFragment>> {
    let fonts = doc.get_page_fonts(page_id).unwrap_or_default();
    let page_height = page_height(doc, page_id);

    let content_data = doc.get_page_content(page_id)?;
    let content =
        Content::decode(&content_data).map_err(|e| Error::Decode(format!("page {page_num}: {e}")))?;

    let mut fragments = Vec::new();

    // Text state per PDF 32000-1 §9.4: the line matrix tracks line
    // starts, the text matrix the current show position. Only the
    // translation components matter for layout reconstruction.
    let mut current_font = String::new();
    let mut font_size: f64 = 12.0;
    let mut leading: f64 = 0.0;
    let mut text_matrix = [1.0_f64, 0.0, 0.0, 1.0, 0.0, 0.0];
    let mut line_matrix = [1.0_f64, 0.0, 0.0, 1.0, 0.0, 0.0];
    let mut in_text = false;

    for op in &content.operations {
        match op.operator.as_str() {
            "BT" => {
                in_text = true;
                text_matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
                line_matrix = text_matrix;
            }
            "ET" => in_text = false,
            "Tf" => {
                if op.operands.len() >= 2 {
                    if let Ok(name) = op.operands[0].as_name() {
                        current_font = String::from_utf8_lossy(name).to_string();
                    }
                    if let Some(size) = as_number(&op.operands[1]) {
                        font_size = size;
                    }
                }
            }
            "TL" => {
                if let Some(value) = op.operands.first().and_then(as_number) {
                    leading = value;
                }
            }
            "Td" | "TD" => {
                if op.operands.len() >= 2 {
                    let tx = as_number(&op.operands[0]).unwrap_or(0.0);
                    let ty = as_number(&op.operands[1]).unwrap_or(0.0);
                    if op.operator == "TD" {
                        leading = -ty;
                    }
                    line_matrix[4] += tx;
                    line_matrix[5] += ty;
                    text_matrix = line_matrix;
                }
            }
            "Tm" => {
                if op.operands.len() >= 6 {
                    for (i, operand) in op.operands.iter().take(6).enumerate() {
                        text_matrix[i] = as_number(operand)
                            .unwrap_or(if i == 0 || i == 3 { 1.0 } else { 0.0 });
                    }
                    line_matrix = text_matrix;
                }
            }
            "T*" => {
                line_matrix[5] -= effective_leading(leading, font_size);
                text_matrix = line_matrix;
            }
            "Tj" => {
                if in_text {
                    if let Some(run) = op
                        .operands
                        .first()
                        .and_then(|obj| decode_string(obj, doc, &fonts, &current_font))
                    {
                        push_fragment(&mut fragments, page_num, &text_matrix, page_height, vec![run]);
                    }
                }
            }
            "'" => {
                line_matrix[5] -= effective_leading(leading, font_size);
                text_matrix = line_matrix;
                if in_text {
                    if let Some(run) = op
                        .operands
                        .first()
                        .and_then(|obj| decode_string(obj, doc, &fonts, &current_font))
                    {
                        push_fragment(&mut fragments, page_num, &text_matrix, page_height, vec![run]);
                    }
                }
            }
            "TJ" => {
                if in_text {
                    if let Some(Ok(array)) = op.operands.first().map(Object::as_array) {
                        let runs: Vec<String> = array
                            .iter()
                            .filter_map(|obj| decode_string(obj, doc, &fonts, &current_font))
                            .collect();
                        if !runs.is_empty() {
                            push_fragment(&mut fragments, page_num, &text_matrix, page_height, runs);
                        }
                    }
                }
            }
            _ => {}
        }
    }

    Ok(fragments)
}

fn push_fragment(
    fragments: &mut Vec<TextFragment>,
    page: u32,
    text_matrix: &[f64; 6],
    page_height: f64,
    runs: Vec<String>,
) {
    if runs.iter().all(|r| r.trim().is_empty()) {
        return;
    }
    fragments.push(TextFragment::with_runs(
        page,
        text_matrix[4],
        page_height - text_matrix[5],
        runs,
    ));
}

fn effective_leading(leading: f64, font_size: f64) -> f64 {
    if leading != 0.0 {
        leading
    } else {
        font_size * 1.2
    }
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(f64::from(*r)),
        _ => None,
    }
}

/// Resolves the page height from its MediaBox, walking up to the page
/// tree root when the page inherits it.
fn page_height(doc: &Document, page_id: ObjectId) -> f64 {
    let mut node_id = Some(page_id);
    // Depth cap guards against cyclic Parent chains in broken files.
    for _ in 0..32 {
        let Some(id) = node_id else {
            break;
        };
        let Ok(node) = doc.get_dictionary(id) else {
            break;
        };
        if let Some(height) = media_box_height(doc, node) {
            return height;
        }
        node_id = node
            .get(b"Parent")
            .ok()
            .and_then(|parent| parent.as_reference().ok());
    }
    DEFAULT_PAGE_HEIGHT
}

fn media_box_height(doc: &Document, node: &Dictionary) -> Option<f64> {
    let media_box = match node.get(b"MediaBox").ok()? {
        Object::Reference(id) => doc.get_object(*id).ok()?.as_array().ok()?.clone(),
        obj => obj.as_array().ok()?.clone(),
    };
    if media_box.len() < 4 {
        return None;
    }
    let y0 = as_number(&media_box[1])?;
    let y1 = as_number(&media_box[3])?;
    Some((y1 - y0).abs())
}

/// Decodes a string operand through the current font's encoding, falling
/// back to UTF-16BE (BOM-marked) and then Latin-1.
fn decode_string(
    obj: &Object,
    doc: &Document,
    fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    current_font: &str,
) -> Option<String> {
    let Object::String(bytes, _) = obj else {
        return None;
    };

    if let Some(font_dict) = fonts.get(current_font.as_bytes()) {
        if let Ok(encoding) = font_dict.get_font_encoding(doc) {
            if let Ok(text) = Document::decode_text(&encoding, bytes) {
                return Some(text);
            }
        }
    }

    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|chunk| u16::from_be_bytes([chunk[0], chunk[1]]))
            .collect();
        return Some(String::from_utf16_lossy(&utf16));
    }

    Some(bytes.iter().map(|&b| b as char).collect())
}
