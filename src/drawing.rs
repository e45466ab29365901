//! PDF drawing operations for grid guides

use crate::Result;
use crate::error::GridError;
use crate::fit::GridLayout;
use crate::style::{Color, GuideStyle};
use lopdf::{
    Document, Object, ObjectId, Stream,
    content::{Content, Operation},
    dictionary,
};
use tracing::{debug, trace};

fn real(value: f64) -> Object {
    (value as f32).into()
}

fn stroke_color(color: Color) -> Operation {
    Operation::new("RG", vec![color.r.into(), color.g.into(), color.b.into()])
}

fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> [Operation; 3] {
    [
        Operation::new("m", vec![real(x0), real(y0)]),
        Operation::new("l", vec![real(x1), real(y1)]),
        Operation::new("S", vec![]),
    ]
}

/// Generate the content-stream operations for a fitted grid.
///
/// Guides run the full width or height of the page, like the on-screen
/// guides of a layout application. Guide coordinates are measured from the
/// top of the page, so they are flipped into the PDF's bottom-left origin
/// here and nowhere else.
pub fn generate_guide_operations(layout: &GridLayout, style: &GuideStyle) -> Vec<Operation> {
    let mut operations = Vec::new();
    let page_width = layout.page_width_pt;
    let page_height = layout.page_height_pt;

    debug!(
        "Generating guide operations: {} horizontal, {} vertical",
        layout.horizontal_guides.len(),
        layout.vertical_guides.len()
    );

    if style.draw_margin_box {
        operations.push(stroke_color(style.margin_color));
        operations.push(Operation::new("w", vec![real(style.margin_width)]));
        operations.push(Operation::new(
            "re",
            vec![
                real(layout.margin_left_pt),
                real(layout.margin_bottom_pt),
                real(page_width - layout.margin_left_pt - layout.margin_right_pt),
                real(page_height - layout.margin_top_pt - layout.margin_bottom_pt),
            ],
        ));
        operations.push(Operation::new("S", vec![]));
    }

    operations.push(stroke_color(style.guide_color));
    operations.push(Operation::new("w", vec![real(style.guide_width)]));

    for &guide in &layout.horizontal_guides {
        let y = page_height - guide;
        operations.extend(line(0.0, y, page_width, y));
    }
    for &guide in &layout.vertical_guides {
        operations.extend(line(guide, 0.0, guide, page_height));
    }

    trace!("Generated {} operations", operations.len());
    operations
}

/// Render a fitted grid into a page's content.
///
/// With `remove_existing` the page's content is replaced wholesale (the
/// "remove existing guides" behavior); otherwise the guide stream is
/// appended after whatever the page already draws.
pub fn apply_guide_operations(
    doc: &mut Document,
    page_id: ObjectId,
    operations: Vec<Operation>,
    remove_existing: bool,
) -> Result<()> {
    debug!(
        "Applying {} operations to page {:?} (remove_existing={})",
        operations.len(),
        page_id,
        remove_existing
    );

    let content = Content { operations };
    let content_bytes = content.encode()?;

    if remove_existing {
        let stream_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));
        let page = doc.get_object_mut(page_id).map_err(|_| GridError::PageNotFound(page_id))?;
        page.as_dict_mut()?.set("Contents", stream_id);
    } else {
        doc.add_page_contents(page_id, content_bytes)?;
    }

    Ok(())
}

/// Read a page's size in points from its MediaBox, walking up the page
/// tree for inherited boxes.
pub fn page_size(doc: &Document, page_id: ObjectId) -> Result<(f64, f64)> {
    let mut dict = doc
        .get_object(page_id)
        .map_err(|_| GridError::PageNotFound(page_id))?
        .as_dict()?;

    loop {
        if let Ok(media_box) = dict.get(b"MediaBox") {
            let media_box = match media_box.as_reference() {
                Ok(id) => doc.get_object(id)?,
                Err(_) => media_box,
            };
            return media_box_size(media_box).ok_or(GridError::MissingMediaBox(page_id));
        }
        match dict.get(b"Parent") {
            Ok(parent) => {
                dict = doc.get_object(parent.as_reference()?)?.as_dict()?;
            }
            Err(_) => return Err(GridError::MissingMediaBox(page_id)),
        }
    }
}

fn media_box_size(media_box: &Object) -> Option<(f64, f64)> {
    let rect = media_box.as_array().ok()?;
    if rect.len() != 4 {
        return None;
    }
    let mut corners = [0.0f64; 4];
    for (corner, obj) in corners.iter_mut().zip(rect) {
        *corner = match obj {
            Object::Integer(i) => *i as f64,
            Object::Real(r) => f64::from(*r),
            _ => return None,
        };
    }
    Some((corners[2] - corners[0], corners[3] - corners[1]))
}
