//! HTML reporter: a self-contained results page
//!
//! Embeds the radar chart data as JSON and draws the chart client-side as
//! SVG. The ranked list is rendered here; descriptions are inserted as given.

use super::order_caption;
use crate::bank::Descriptions;
use crate::scoring::radar_points;
use crate::{QuizOptions, QuizResults, RankedScore, ResultsLayout};
use std::fmt::Write;

/// Keep `</script>` out of the embedded JSON block
fn escape_json_for_script(s: &str) -> String {
    s.replace("</", "<\\/")
}

/// Escape text for element content and attribute values
fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Reporter that generates a standalone HTML results page
pub struct HtmlReporter {
    layout: ResultsLayout,
    show_descriptions: bool,
}

impl HtmlReporter {
    pub fn new() -> Self {
        Self {
            layout: ResultsLayout::Accordion,
            show_descriptions: true,
        }
    }

    pub fn from_options(options: &QuizOptions) -> Self {
        Self {
            layout: options.results_layout,
            show_descriptions: options.show_descriptions,
        }
    }

    /// Generate the full HTML page
    pub fn report(&self, results: &QuizResults, descriptions: &Descriptions) -> String {
        let data_json = serde_json::to_string(&radar_points(&results.scores))
            .unwrap_or_else(|_| "[]".to_string());

        let mut html = String::with_capacity(16_384);
        html.push_str(Self::template_head());
        html.push_str("<main class=\"quiz-box\">\n<h2 class=\"results-title\">Your Wheel of Health</h2>\n");
        html.push_str("<div class=\"chart-wrapper\"><svg id=\"radar\" viewBox=\"0 0 500 500\" role=\"img\" aria-label=\"Radar chart of category scores\"></svg></div>\n");

        let _ = writeln!(
            html,
            "<p class=\"subtitle\">{}</p>",
            order_caption(results.sort_order)
        );
        match self.layout {
            ResultsLayout::Accordion => self.render_accordion(&mut html, &results.ranked, descriptions),
            ResultsLayout::Grid => self.render_grid(&mut html, &results.ranked, descriptions),
        }
        html.push_str("</main>\n");

        html.push_str("<script>const DATA=");
        html.push_str(&escape_json_for_script(&data_json));
        html.push_str(";</script>\n");
        html.push_str(Self::template_script());
        html.push_str("</body>\n</html>\n");
        html
    }

    fn render_accordion(&self, html: &mut String, ranked: &[RankedScore], descriptions: &Descriptions) {
        html.push_str("<div class=\"scores-accordion\">\n");
        for entry in ranked {
            let header = format!(
                "<span class=\"score-dot score-{level}\"></span><span class=\"title\">{name}</span><span class=\"score\">{score:.1} / {max}</span><span class=\"label score-{level}\">{band}</span>",
                level = entry.band.level(),
                name = escape_html(&entry.category),
                score = entry.score,
                max = entry.scale_max,
                band = entry.band,
            );
            if self.show_descriptions {
                let _ = writeln!(
                    html,
                    "<details class=\"accordion-item\"><summary>{}</summary><div class=\"accordion-content\">{}</div></details>",
                    header,
                    descriptions.get(&entry.category)
                );
            } else {
                let _ = writeln!(html, "<div class=\"accordion-item\"><div class=\"row\">{}</div></div>", header);
            }
        }
        html.push_str("</div>\n");
    }

    fn render_grid(&self, html: &mut String, ranked: &[RankedScore], descriptions: &Descriptions) {
        html.push_str("<div class=\"scores-grid\">\n");
        for entry in ranked {
            let _ = write!(
                html,
                "<div class=\"card score-{level}\"><div class=\"title\">{name}</div><div class=\"score\">{score:.1} / {max}</div><div class=\"label\">{band}</div>",
                level = entry.band.level(),
                name = escape_html(&entry.category),
                score = entry.score,
                max = entry.scale_max,
                band = entry.band,
            );
            if self.show_descriptions {
                let _ = write!(
                    html,
                    "<div class=\"card-content\">{}</div>",
                    descriptions.get(&entry.category)
                );
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
    }

    // ─── HTML template pieces ────────────────────────────────────────────

    fn template_head() -> &'static str {
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Your Wheel of Health</title>
<style>
:root{--text:#3b4252;--muted:#666;--border:#e0e0e0;--low:#dc2626;--medium:#d97706;--high:#16a34a;--radius:8px}
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Roboto,sans-serif;color:var(--text);background:#f5f5f7;line-height:1.5}
.quiz-box{max-width:760px;margin:2rem auto;background:#fff;border-radius:12px;padding:2rem;box-shadow:0 2px 12px rgba(0,0,0,.06)}
.results-title{text-align:center;margin-bottom:1rem}
.chart-wrapper svg{width:100%;max-height:500px}
#radar .grid{fill:none;stroke:var(--border)}
#radar .axis{stroke:var(--border)}
#radar .score{fill:rgba(59,66,82,.5);stroke:#3b4252;stroke-width:2}
#radar text{font-size:11px;fill:var(--muted)}
.subtitle{color:var(--muted);font-size:.875rem;margin:1rem 0 .5rem}
.accordion-item{border-bottom:1px solid var(--border)}
.accordion-item summary,.accordion-item .row{display:flex;align-items:center;gap:.75rem;padding:.75rem 0;cursor:pointer}
.accordion-item .title{flex:1;font-weight:600}
.accordion-content{padding:0 0 1rem 1.5rem;color:var(--muted)}
.score-dot{width:10px;height:10px;border-radius:50%;display:inline-block}
.score-dot.score-low{background:var(--low)}.score-dot.score-medium{background:var(--medium)}.score-dot.score-high{background:var(--high)}
.label.score-low{color:var(--low)}.label.score-medium{color:var(--medium)}.label.score-high{color:var(--high)}
.scores-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(200px,1fr));gap:.75rem}
.card{border:1px solid var(--border);border-left:4px solid;border-radius:var(--radius);padding:.75rem}
.card.score-low{border-left-color:var(--low)}.card.score-medium{border-left-color:var(--medium)}.card.score-high{border-left-color:var(--high)}
.card .title{font-weight:600}.card .label{font-size:.75rem;color:var(--muted)}
.card-content{font-size:.8125rem;color:var(--muted);margin-top:.5rem}
</style>
</head>
<body>
"##
    }

    fn template_script() -> &'static str {
        r##"<script>
(function(){
  const svg=document.getElementById('radar');
  const n=DATA.length;
  if(!n){return;}
  const cx=250,cy=250,r=180;
  const esc=s=>String(s).replace(/[&<>"']/g,c=>({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}[c]));
  const pt=(i,v,max)=>{const a=-Math.PI/2+2*Math.PI*i/n;return[cx+r*(v/max)*Math.cos(a),cy+r*(v/max)*Math.sin(a)];};
  const poly=(vals,max)=>vals.map((v,i)=>pt(i,v,max).map(x=>x.toFixed(1)).join(',')).join(' ');
  let g='';
  const max=DATA[0].fullMark;
  for(let k=2;k<=max;k+=2){g+='<polygon class="grid" points="'+poly(DATA.map(()=>k),max)+'"/>';}
  DATA.forEach((d,i)=>{
    const[x,y]=pt(i,max,max);
    g+='<line class="axis" x1="'+cx+'" y1="'+cy+'" x2="'+x.toFixed(1)+'" y2="'+y.toFixed(1)+'"/>';
    const[lx,ly]=pt(i,max*1.15,max);
    g+='<text x="'+lx.toFixed(1)+'" y="'+ly.toFixed(1)+'" text-anchor="middle">'+esc(d.subject)+'</text>';
  });
  g+='<polygon class="score" points="'+poly(DATA.map(d=>d.score),max)+'"/>';
  svg.innerHTML=g;
})();
</script>
"##
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}
