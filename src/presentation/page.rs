// Page shell - tabs, per-panel controls and the current render targets
use std::fmt::Write;

use crate::application::dashboard::Dashboard;
use crate::domain::panel::{PanelId, TimePeriod};
use crate::infrastructure::svg::escape;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 20px; }
.tabs { display: flex; gap: 4px; margin-bottom: 16px; }
.tab { padding: 8px 12px; border: 1px solid #ccc; background: #f7f7f7; cursor: pointer; }
.panel-form { display: flex; gap: 8px; align-items: center; margin-bottom: 12px; }
.loader { color: #666; }
.error { color: #b00020; min-height: 1em; }
.hidden { display: none; }
.data-table { border-collapse: collapse; }
.data-table th, .data-table td { border: 1px solid #ddd; padding: 4px 8px; }
.tooltip { background: #fff; border: 1px solid #999; border-radius: 4px; }
.tooltip { padding: 6px; font-size: 12px; }
"#;

const SCRIPT: &str = r#"
function bindTooltips(root) {
  root.querySelectorAll('.render-target').forEach(function (target) {
    var data = target.querySelector('script.hover-bindings');
    var tooltip = target.querySelector('.tooltip');
    if (!data || !tooltip) return;
    JSON.parse(data.textContent).forEach(function (b) {
      var mark = document.getElementById(b.mark);
      if (!mark) return;
      mark.addEventListener('mouseover', function (e) {
        tooltip.innerHTML = b.html;
        tooltip.style.display = 'block';
        tooltip.style.left = (e.pageX + b.dx) + 'px';
        tooltip.style.top = (e.pageY + b.dy) + 'px';
        if (b.highlight) {
          mark.setAttribute('stroke', b.highlight.hover[0]);
          mark.setAttribute('stroke-width', b.highlight.hover[1]);
        }
      });
      mark.addEventListener('mouseout', function () {
        tooltip.style.display = 'none';
        if (b.highlight) {
          mark.setAttribute('stroke', b.highlight.rest[0]);
          mark.setAttribute('stroke-width', b.highlight.rest[1]);
        }
      });
    });
  });
}

document.querySelectorAll('.tab').forEach(function (tab) {
  tab.addEventListener('click', function () {
    document.querySelectorAll('.panel').forEach(function (panel) {
      panel.hidden = panel.id !== tab.dataset.panel + '-panel';
    });
  });
});

document.querySelectorAll('.panel-form').forEach(function (form) {
  form.addEventListener('submit', async function (event) {
    event.preventDefault();
    var section = form.closest('.panel');
    var loader = section.querySelector('.loader');
    var error = section.querySelector('.error');
    var seq = (form.seq || 0) + 1;
    form.seq = seq;
    loader.hidden = false;
    error.textContent = '';
    try {
      var response = await fetch('/panels/' + form.dataset.panel, {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(Object.fromEntries(new FormData(form).entries()))
      });
      var payload = await response.json();
      if (!response.ok) {
        if (seq === form.seq) loader.hidden = true;
        alert(payload.error);
        return;
      }
      // A newer request still owns the panel.
      if (payload.loading) return;
      loader.hidden = true;
      error.textContent = payload.error || '';
      section.querySelector('.panel-body').innerHTML = payload.html;
      bindTooltips(section);
    } catch (e) {
      if (seq !== form.seq) return;
      loader.hidden = true;
      error.textContent = String(e);
    }
  });
});

bindTooltips(document);
"#;

pub fn render_page(dashboard: &Dashboard) -> String {
    let mut out = String::from(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Energy Dashboard</title>",
    );
    let _ = write!(out, "<style>{}</style></head><body><h1>Energy Dashboard</h1>", STYLE);

    out.push_str("<nav class=\"tabs\">");
    for id in PanelId::ALL {
        let _ = write!(
            out,
            "<button type=\"button\" class=\"tab\" data-panel=\"{}\">{}</button>",
            id,
            escape(id.title())
        );
    }
    out.push_str("</nav>");

    for (i, id) in PanelId::ALL.into_iter().enumerate() {
        let _ = write!(
            out,
            "<section id=\"{id}-panel\" class=\"panel\"{}><h2>{}</h2>",
            if i == 0 { "" } else { " hidden" },
            escape(id.title())
        );
        write_controls(&mut out, id, dashboard.cities());
        out.push_str("<div class=\"loader\" hidden>Loading...</div><div class=\"error\"></div>");
        out.push_str("<div class=\"panel-body\">");
        if let Some(controller) = dashboard.controller(id) {
            out.push_str(&controller.snapshot().html);
        }
        out.push_str("</div></section>");
    }

    let _ = write!(out, "<script>{}</script></body></html>", SCRIPT);
    out
}

fn write_controls(out: &mut String, id: PanelId, cities: &[String]) {
    let _ = write!(out, "<form class=\"panel-form\" data-panel=\"{}\">", id);

    if id != PanelId::ClusterHealth {
        out.push_str("<label>City <select name=\"city\">");
        for city in cities {
            let city = escape(city);
            let _ = write!(out, "<option value=\"{city}\">{city}</option>");
        }
        out.push_str("</select></label>");
    }

    match id {
        PanelId::ZipHeatmap => {
            out.push_str("<label>Time period <select name=\"time_period\">");
            for period in TimePeriod::ALL {
                let _ = write!(out, "<option value=\"{0}\">{0}</option>", period.as_str());
            }
            out.push_str("</select></label>");
        }
        PanelId::UnitTypeUsage => {
            out.push_str("<label>Start <input type=\"date\" name=\"start_date\"></label>");
            out.push_str("<label>End <input type=\"date\" name=\"end_date\"></label>");
        }
        _ => {}
    }

    out.push_str("<button type=\"submit\">Load</button></form>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::ServiceSettings;
    use crate::infrastructure::energy_api_client::EnergyApiClient;
    use std::sync::Arc;

    fn dashboard() -> Dashboard {
        let client = EnergyApiClient::new(&ServiceSettings {
            base_url: "http://127.0.0.1:1".into(),
            timeout_secs: 1,
        })
        .unwrap();
        Dashboard::new(Arc::new(client), vec!["Toronto".into(), "St. John's".into()])
    }

    #[test]
    fn test_page_has_a_tab_and_container_per_panel() {
        let html = render_page(&dashboard());
        assert_eq!(html.matches("class=\"tab\"").count(), 6);
        for id in PanelId::ALL {
            assert!(html.contains(&format!("id=\"{}\"", id.container_id())));
        }
        assert!(html.contains(r#"<section id="daily-average-panel" class="panel">"#));
        assert!(html.contains(r#"<section id="top-units-panel" class="panel" hidden>"#));
    }

    #[test]
    fn test_controls_follow_panel_inputs() {
        let html = render_page(&dashboard());
        assert!(html.contains("<option value=\"St. John&#39;s\">St. John&#39;s</option>"));
        assert_eq!(html.matches("name=\"time_period\"").count(), 1);
        assert_eq!(html.matches("name=\"start_date\"").count(), 1);
        // Every panel but cluster health picks a city.
        assert_eq!(html.matches("name=\"city\"").count(), 5);
    }

    #[test]
    fn test_loader_follows_snapshot_loading_flag() {
        assert!(SCRIPT.contains("if (payload.loading) return;"));
        assert!(!SCRIPT.contains("finally"));
        // Only the latest submission may hide the loader on a failed request.
        assert_eq!(SCRIPT.matches("seq === form.seq").count(), 1);
        assert_eq!(SCRIPT.matches("seq !== form.seq").count(), 1);
    }

    #[test]
    fn test_table_panels_start_hidden() {
        let html = render_page(&dashboard());
        assert_eq!(html.matches("class=\"data-table hidden\"").count(), 2);
    }
}
