use std::fmt::Write;

use tradewise_core::report::{
    BUTTON_LABEL, DEFAULT_SYMBOL, INPUT_LABEL, SUBTITLE, TITLE,
};
use tradewise_core::{Block, Report};

use crate::markdown;

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:46rem;margin:2rem auto;padding:0 1rem;color:#262730}\
label{display:block;margin:1rem 0 .3rem}\
input{width:100%;padding:.5rem;font-size:1rem;box-sizing:border-box}\
button{margin-top:.8rem;padding:.5rem 1rem;font-size:1rem;cursor:pointer}\
.success{background:#e6f4ea;color:#0f5132;padding:.8rem;border-radius:.4rem}\
.error{background:#fdecea;color:#842029;padding:.8rem;border-radius:.4rem}\
.detail{background:#f6f6f9;padding:.8rem;border-radius:.4rem;white-space:pre-wrap;font-family:monospace}\
.insight{line-height:1.5}\
#busy{display:none;color:#666;margin-top:.8rem}";

// Shows a loading note while the request is in flight.
const SCRIPT: &str = "document.getElementById('ask').addEventListener('submit',function(){\
document.getElementById('go').disabled=true;\
document.getElementById('busy').style.display='block';});";

/// Full HTML page: the input form, plus the report area when a run happened.
pub fn render(symbol: &str, report: Option<&Report>) -> String {
    let mut html = String::with_capacity(2048);
    html.push_str("<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">");
    let _ = write!(html, "<title>📈 AI Trading Assistant</title><style>{STYLE}</style></head><body>");
    let _ = write!(html, "<h1>{}</h1><p>{}</p>", escape(TITLE), escape(SUBTITLE));

    html.push_str("<form id=\"ask\" method=\"post\" action=\"/insight\">");
    let _ = write!(
        html,
        "<label for=\"symbol\">{}</label>\
<input id=\"symbol\" name=\"symbol\" type=\"text\" value=\"{}\" autocomplete=\"off\">\
<button id=\"go\" type=\"submit\">{}</button>",
        escape(INPUT_LABEL),
        escape(symbol),
        escape(BUTTON_LABEL)
    );
    html.push_str("<div id=\"busy\">Fetching stock data...</div></form>");

    if let Some(report) = report {
        html.push_str("<section id=\"result\">");
        for block in &report.blocks {
            render_block(&mut html, block);
        }
        html.push_str("</section>");
    }

    let _ = write!(html, "<script>{SCRIPT}</script></body></html>");
    html
}

pub fn initial_page() -> String {
    render(DEFAULT_SYMBOL, None)
}

fn render_block(html: &mut String, block: &Block) {
    let _ = match block {
        Block::Success(text) => write!(html, "<p class=\"success\">{}</p>", escape(text)),
        Block::Heading(text) => write!(html, "<h2>{}</h2>", escape(text)),
        Block::Insight(text) => write!(html, "<div class=\"insight\">{}</div>", markdown::render(text)),
        Block::Error(text) => write!(html, "<p class=\"error\">{}</p>", escape(text)),
        Block::Detail(text) => write!(html, "<pre class=\"detail\">{}</pre>", escape(text)),
    };
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
