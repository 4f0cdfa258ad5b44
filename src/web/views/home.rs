use super::page;

pub fn render() -> String {
    let body = r#"<div class="landing">
<h1>Prun Tools</h1>
<div class="cards">
<div class="card">
<h2>Shipping</h2>
<p><em>Work in Progress</em></p>
<p>• Shipping quote tool (coming soon)</p>
<p>• Shipping status</p>
<a class="button" href="/shipping">View</a>
</div>
<div class="card">
<h2>Stocks</h2>
<p><em>Work in Progress</em></p>
<p>Display list of Materials and exchange data</p>
<a class="button" href="/stocks">View</a>
</div>
</div>
</div>"#;
    page("Prun Tools", body)
}
