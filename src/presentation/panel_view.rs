// Panel view - maps a panel to its render target and renderer
use crate::application::error::RenderError;
use crate::domain::panel::PanelId;
use crate::domain::records::{NodeHealthRow, PanelData, TopUnitRow};
use crate::presentation::charts::{
    flat_bar::render_flat_bar_chart, grouped_bar::render_grouped_bar_chart, heatmap::render_heatmap,
    line::render_line_chart,
};
use crate::presentation::render_target::RenderTarget;
use crate::presentation::tables::render_table;

/// Fresh, empty target for `panel`. Table panels start with a hidden skeleton.
pub fn target_for(panel: PanelId) -> RenderTarget {
    match panel {
        PanelId::ClusterHealth => {
            RenderTarget::with_table(panel.container_id(), &NodeHealthRow::HEADERS)
        }
        PanelId::TopUnits => RenderTarget::with_table(panel.container_id(), &TopUnitRow::HEADERS),
        _ => RenderTarget::new(panel.container_id()),
    }
}

/// Draw `data` into `target`, replacing whatever the target showed before.
pub fn render_panel(target: &mut RenderTarget, data: &PanelData) -> Result<(), RenderError> {
    match data {
        PanelData::DailyAverage(records) => render_line_chart(target, records),
        PanelData::ClusterHealth(rows) => render_table(target, rows.iter().map(|r| r.cells()))?,
        PanelData::ZipHeatmap(grid) => render_heatmap(target, grid),
        PanelData::UnitTypeUsage(breakdown) => render_grouped_bar_chart(target, breakdown),
        PanelData::TopUnits(rows) => render_table(target, rows.iter().map(|r| r.cells()))?,
        PanelData::DeviceType(records) => render_flat_bar_chart(target, records),
    }
    Ok(())
}
