// Table renderer - fills the body of a target's table skeleton
use crate::application::error::RenderError;
use crate::infrastructure::svg::Element;
use crate::presentation::render_target::RenderTarget;

/// Reveal the target's table and replace its body rows with `rows`.
///
/// The header row is left alone. An empty `rows` still reveals the table, so
/// an empty dataset shows headers over no body rows.
pub fn render_table<R, C>(target: &mut RenderTarget, rows: R) -> Result<(), RenderError>
where
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: AsRef<str>,
{
    let id = target.id().to_string();
    let table = target
        .nodes_mut()
        .iter_mut()
        .find_map(|n| n.find_mut(&|e: &Element| e.tag() == "table"))
        .ok_or_else(|| RenderError::MissingTableBody(id.clone()))?;
    table.remove_class("hidden");

    let body = table
        .find_mut(&|e: &Element| e.tag() == "tbody")
        .ok_or(RenderError::MissingTableBody(id))?;
    body.clear_children();

    let mut count = 0;
    for row in rows {
        let tr = row
            .into_iter()
            .fold(Element::new("tr"), |tr, cell| {
                tr.child(Element::new("td").text(cell.as_ref()))
            });
        body.push(tr);
        count += 1;
    }

    tracing::debug!("Table in {} filled with {} rows", target.id(), count);
    Ok(())
}
