//! HTML chart rendering with D3.js
//!
//! The chart is split the same way an embeddable plotting widget is:
//!
//! - [`render_div`]: the markup (search box, two panel containers, tooltip)
//! - [`render_script`]: a `<script>` block carrying the chart model as JSON
//!   plus the drawing and interaction code
//!
//! The host page must load D3 v7 ([`D3_CDN`]) before the script block runs.
//! Every element id is prefixed with the chart's id, so one page can hold
//! several charts as long as each gets its own [`ChartModel::with_id`].
//! [`write_standalone`] and [`write_page`] wrap both fragments into complete
//! documents.
//!
//! The page-side search/hover handlers follow the same contract as
//! [`crate::view::ViewController`]. In remote mode they forward events to the
//! local server instead and render whatever state it returns.

use crate::view::chart::ChartModel;
use std::io::{self, Write};

pub const D3_CDN: &str = "https://d3js.org/d3.v7.min.js";

pub fn render_div(chart: &ChartModel) -> String {
    format!(
        r#"<div id="{root}" class="rosterview">
    <style>
        .rosterview {{ font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; color: #212529; }}
        .rosterview .rv-search {{ margin-bottom: 12px; }}
        .rosterview .rv-search label {{ display: block; font-size: 0.9rem; margin-bottom: 4px; }}
        .rosterview .rv-search input {{
            width: 300px;
            padding: 6px 8px;
            border: 1px solid #cccccc;
            border-radius: 4px;
            font-size: 0.95rem;
        }}
        .rosterview .rv-row {{ display: flex; flex-wrap: wrap; gap: 16px; }}
        .rosterview .rv-title {{ font-weight: 600; text-anchor: middle; }}
        .rosterview .rv-axis-label {{ font-weight: bold; text-anchor: middle; }}
        .rosterview .grid line {{ stroke: #eeeeee; }}
        .rosterview .grid path {{ stroke: none; }}
        .rv-tooltip {{
            position: absolute;
            background: #ffffff;
            border: 1px solid #cccccc;
            border-radius: 4px;
            padding: 6px 10px;
            font-size: 0.85rem;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.1s;
            box-shadow: 0 2px 6px rgba(0,0,0,0.15);
            z-index: 1000;
        }}
        .rv-tooltip.visible {{ opacity: 1; }}
    </style>
    <div class="rv-search">
        <label for="{search}">{label}</label>
        <input id="{search}" type="text" autocomplete="off" spellcheck="false">
    </div>
    <div class="rv-row">
        <div id="{scatter}"></div>
        <div id="{histogram}"></div>
    </div>
    <div id="{tooltip}" class="rv-tooltip"></div>
</div>"#,
        root = html_escape(&chart.element_id("root")),
        search = html_escape(&chart.element_id("search")),
        scatter = html_escape(&chart.element_id("scatter")),
        histogram = html_escape(&chart.element_id("histogram")),
        tooltip = html_escape(&chart.element_id("tooltip")),
        label = html_escape(chart.search_label),
    )
}

pub fn render_script(chart: &ChartModel) -> serde_json::Result<String> {
    let json = chart.to_script_json()?;
    Ok(format!(
        "<script type=\"text/javascript\">\n(function (data) {{\n{}\n}})({});\n</script>",
        CHART_JS, json
    ))
}

/// Chart-only document: D3, the markup and the script, nothing else
pub fn write_standalone<W: Write>(writer: &mut W, chart: &ChartModel) -> io::Result<()> {
    let script = render_script(chart)?;

    write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
    <script src="{d3}"></script>
</head>
<body>
{div}
{script}
</body>
</html>
"#,
        title = html_escape(&chart.scatter.title),
        d3 = D3_CDN,
        div = render_div(chart),
        script = script,
    )
}

/// Complete page with header, usage notes and a generation timestamp
pub fn write_page<W: Write>(writer: &mut W, chart: &ChartModel, generated: &str) -> io::Result<()> {
    let script = render_script(chart)?;

    let heading = if chart.scatter.points.is_empty() {
        "NBA Team Height Distribution Analysis".to_string()
    } else {
        let cb = &chart.scatter.color_bar;
        format!("NBA Team Height Distribution Analysis ({}-{})", cb.low, cb.high)
    };

    write!(writer, r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>NBA Team Height Distribution Analysis</title>
    <script src="{d3}"></script>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            padding: 0;
            background-color: #f8f9fa;
        }}

        header {{
            background-color: #1d428a;
            color: white;
            padding: 20px;
            text-align: center;
            border-bottom: 5px solid #c8102e;
        }}

        .container {{
            max-width: 1400px;
            margin: 0 auto;
            padding: 20px;
        }}

        h1 {{
            margin: 0;
            font-size: 2.2em;
        }}

        .subtitle {{
            font-style: italic;
            margin-top: 8px;
            font-weight: 300;
        }}

        .instructions {{
            background-color: #fffaed;
            border-left: 4px solid #ffc107;
            padding: 12px 15px;
            margin: 15px 0;
            border-radius: 4px;
        }}

        .footer {{
            margin-top: 2rem;
            padding-top: 1rem;
            border-top: 1px solid #dddddd;
            color: #6c757d;
            font-size: 0.875rem;
            text-align: center;
        }}
    </style>
</head>
<body>
    <header>
        <h1>{heading}</h1>
        <div class="subtitle">Exploring the evolution of roster height patterns</div>
    </header>

    <div class="container">
        <div class="instructions">
            <strong>How to use:</strong>
            <ul>
                <li>Hover over any team point on the left chart to see its height distribution</li>
                <li>Search for a specific team by typing its ID (e.g., 2016GSW for 2016 Golden State Warriors)</li>
                <li>Points are colored by season - newer seasons appear in lighter colors</li>
            </ul>
        </div>

        {div}

        <div class="footer">Generated {generated}</div>
    </div>

    {script}
</body>
</html>
"#,
        d3 = D3_CDN,
        heading = html_escape(&heading),
        div = render_div(chart),
        generated = html_escape(generated),
        script = script,
    )
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Drawing and interaction code. Runs with `data` bound to the chart model.
const CHART_JS: &str = r#"
    const part = name => document.getElementById(`${data.id}-${name}`);
    const root = part('root');
    if (!root || typeof d3 === 'undefined') {
        console.error(`rosterview: chart root '${data.id}-root' or D3 missing`);
        return;
    }

    const sc = data.scatter;
    const hc = data.histogram;
    const state = Object.assign({}, data.initial);
    const pts = sc.points.map((p, i) => Object.assign({ index: i }, p));
    const input = d3.select(part('search'));
    const tooltip = d3.select(part('tooltip'));

    const extent = values => values.length ? d3.extent(values) : [0, 1];
    const padded = ([lo, hi]) => {
        const span = (hi - lo) || 1;
        return [lo - span * 0.05, hi + span * 0.05];
    };

    function panel(container, width, height, margin) {
        const svg = d3.select(container).append('svg')
            .attr('width', width)
            .attr('height', height);
        svg.append('rect').attr('width', width).attr('height', height).attr('fill', '#ffffff');
        const w = width - margin.left - margin.right;
        const h = height - margin.top - margin.bottom;
        const g = svg.append('g').attr('transform', `translate(${margin.left},${margin.top})`);
        g.append('rect')
            .attr('width', w)
            .attr('height', h)
            .attr('fill', '#f8f9fa')
            .attr('stroke', '#cccccc');
        return { svg, g, w, h };
    }

    function labels(p, margin, title, xLabel, yLabel, titleSize) {
        const titleText = p.svg.append('text')
            .attr('class', 'rv-title')
            .attr('x', margin.left + p.w / 2)
            .attr('y', margin.top / 2 + 6)
            .style('font-size', titleSize)
            .text(title);
        p.svg.append('text')
            .attr('class', 'rv-axis-label')
            .attr('x', margin.left + p.w / 2)
            .attr('y', margin.top + p.h + 45)
            .text(xLabel);
        p.svg.append('text')
            .attr('class', 'rv-axis-label')
            .attr('transform', `translate(18,${margin.top + p.h / 2}) rotate(-90)`)
            .text(yLabel);
        return titleText;
    }

    // ---- Scatter panel -------------------------------------------------

    const sm = { top: 50, right: 90, bottom: 60, left: 70 };
    const sp = panel(part('scatter'), sc.width, sc.height, sm);
    labels(sp, sm, sc.title, sc.x_label, sc.y_label, '16pt');

    const x = d3.scaleLinear().domain(padded(extent(pts.map(p => p.x)))).range([0, sp.w]);
    const y = d3.scaleLinear().domain(padded(extent(pts.map(p => p.y)))).range([sp.h, 0]);

    sp.g.append('g').attr('class', 'grid')
        .call(d3.axisBottom(x).tickSize(sp.h).tickFormat(''));
    sp.g.append('g').attr('class', 'grid')
        .call(d3.axisLeft(y).tickSize(-sp.w).tickFormat(''));
    sp.g.append('g').attr('transform', `translate(0,${sp.h})`).call(d3.axisBottom(x));
    sp.g.append('g').call(d3.axisLeft(y));

    const points = sp.g.append('g').selectAll('circle')
        .data(pts)
        .join('circle')
        .attr('cx', d => x(d.x))
        .attr('cy', d => y(d.y))
        .attr('r', sc.point_size / 2)
        .attr('fill', d => d.color)
        .style('cursor', 'pointer')
        .on('mouseenter', (event, d) => {
            showTooltip(event, d);
            onHover(d.index);
        })
        .on('mousemove', moveTooltip)
        .on('mouseleave', hideTooltip);

    // Season color bar
    const cb = sc.color_bar;
    const gradId = `${data.id}-season-gradient`;
    const grad = sp.svg.append('defs').append('linearGradient')
        .attr('id', gradId)
        .attr('x1', '0%').attr('y1', '100%')
        .attr('x2', '0%').attr('y2', '0%');
    cb.stops.forEach((c, i) => {
        grad.append('stop')
            .attr('offset', `${(i / Math.max(cb.stops.length - 1, 1)) * 100}%`)
            .attr('stop-color', c);
    });
    const cbX = sm.left + sp.w + 20;
    sp.svg.append('rect')
        .attr('x', cbX)
        .attr('y', sm.top)
        .attr('width', 10)
        .attr('height', sp.h)
        .attr('fill', `url(#${gradId})`);
    const cbScale = d3.scaleLinear().domain([cb.low, cb.high]).range([sp.h, 0]);
    sp.svg.append('g')
        .attr('transform', `translate(${cbX + 10},${sm.top})`)
        .call(d3.axisRight(cbScale).ticks(6).tickFormat(d3.format('d')));
    sp.svg.append('text')
        .attr('x', cbX)
        .attr('y', sm.top - 12)
        .style('font-size', '12pt')
        .style('font-weight', 'bold')
        .text(cb.title);

    // ---- Histogram panel -----------------------------------------------

    const hm = { top: 50, right: 20, bottom: 60, left: 60 };
    const hp = panel(part('histogram'), hc.width, hc.height, hm);
    const histTitle = labels(hp, hm, state.title, hc.x_label, hc.y_label, '14pt');

    const xh = d3.scaleLinear().domain(hc.x_range).range([0, hp.w]);
    const yh = d3.scaleLinear().domain(hc.y_range).range([hp.h, 0]);
    const tickValues = hc.x_ticks.map(t => t.value);

    hp.g.append('g').attr('class', 'grid')
        .call(d3.axisLeft(yh).tickValues(hc.y_ticks).tickSize(-hp.w).tickFormat(''));
    hp.g.append('g').attr('transform', `translate(0,${hp.h})`)
        .call(d3.axisBottom(xh).tickValues(tickValues).tickFormat((v, i) => hc.x_ticks[i].label));
    hp.g.append('g').call(d3.axisLeft(yh).tickValues(hc.y_ticks).tickFormat(d3.format('d')));

    const clipId = `${data.id}-hist-clip`;
    hp.svg.append('clipPath').attr('id', clipId)
        .append('rect').attr('width', hp.w).attr('height', hp.h);
    const plot = hp.g.append('g').attr('clip-path', `url(#${clipId})`);

    plot.selectAll('line.edge')
        .data(hc.bin_edges)
        .join('line')
        .attr('class', 'edge')
        .attr('x1', d => xh(d)).attr('x2', d => xh(d))
        .attr('y1', 0).attr('y2', hp.h)
        .attr('stroke', 'gray')
        .attr('stroke-width', 0.5)
        .attr('stroke-dasharray', '4,3');

    const half = hc.bar_width / 2;
    const bars = plot.selectAll('rect.bar')
        .data(hc.bin_centers)
        .join('rect')
        .attr('class', 'bar')
        .attr('x', c => xh(c - half))
        .attr('width', c => xh(c + half) - xh(c - half))
        .attr('fill', '#1d428a')
        .attr('fill-opacity', 0.8)
        .attr('stroke', 'white');

    // ---- View state ----------------------------------------------------

    function applyState(next) {
        Object.assign(state, next);

        histTitle.text(state.title);
        bars.data(state.active_histogram)
            .attr('y', d => yh(Math.max(d, hc.y_range[0])))
            .attr('height', d => Math.max(0, yh(hc.y_range[0]) - yh(d)));

        // Only one point carries the selection outline
        points
            .attr('stroke', 'white')
            .attr('stroke-width', 0.5)
            .attr('fill-opacity', 0.8);
        if (state.highlighted_point_index !== null && state.highlighted_point_index !== undefined) {
            points.filter(d => d.index === state.highlighted_point_index)
                .attr('stroke', 'red')
                .attr('stroke-width', 2)
                .attr('fill-opacity', 1)
                .raise();
        }

        if (input.property('value') !== state.search_text) {
            input.property('value', state.search_text);
        }
    }

    function select(idx) {
        const p = pts[idx];
        if (!p) return null;
        const hist = data.histograms[p.roster];
        if (!hist) {
            console.warn(`rosterview: no histogram for ${p.roster}`);
            return null;
        }
        return {
            selected_roster_id: p.roster,
            active_histogram: hist,
            highlighted_point_index: idx,
            title: `Height Distribution for ${p.roster}`,
        };
    }

    function localSearch(text) {
        const query = text.trim();
        const hit = Object.prototype.hasOwnProperty.call(data.roster_index, query)
            ? select(data.roster_index[query])
            : null;
        return Object.assign({}, state, hit || {}, { search_text: text });
    }

    function localHover(idx) {
        const hit = select(idx);
        return hit ? Object.assign({}, state, hit, { search_text: pts[idx].roster }) : state;
    }

    function remote(url) {
        fetch(url)
            .then(r => r.json())
            .then(res => { if (res.ok && res.data) applyState(res.data); })
            .catch(err => console.error('rosterview:', err));
    }

    function onSearch(text) {
        if (data.remote) {
            remote('/api/search?' + new URLSearchParams({ q: text }));
        } else {
            applyState(localSearch(text));
        }
    }

    function onHover(idx) {
        if (idx === undefined || idx === null) return;
        if (data.remote) {
            remote('/api/hover?' + new URLSearchParams({ index: idx }));
        } else {
            applyState(localHover(idx));
        }
    }

    // ---- Tooltip -------------------------------------------------------

    // Ids come from the input table, so they are only ever set as text
    function showTooltip(event, d) {
        tooltip.text('');
        const line = (label, value) => {
            const row = tooltip.append('div');
            row.append('strong').text(`${label}: `);
            row.append('span').text(value);
        };
        line('Team', d.roster);
        line('Season', d.season);
        tooltip.classed('visible', true);
        moveTooltip(event);
    }

    function moveTooltip(event) {
        tooltip
            .style('left', (event.pageX + 12) + 'px')
            .style('top', (event.pageY - 12) + 'px');
    }

    function hideTooltip() {
        tooltip.classed('visible', false);
    }

    input.on('input', function () { onSearch(this.value); });
    applyState(state);
    // The server may hold a state from an earlier page load
    if (data.remote) remote('/api/state');
"#;
