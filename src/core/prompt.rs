//! Rendering-capabilities section of the assistant system prompt
//!
//! The supported-kinds list is generated from [`KINDS`], so the prompt never
//! advertises a kind the renderer cannot draw.

use crate::core::chart::kinds::{grouped, KINDS};
use std::fmt::Write;

const INTRO: &str = "\
As an assistant, you can render two kinds of content. Normal text and code use markdown, \
with every markdown feature available. Data visualizations are more powerful but require \
an exact XML structure, described below.";

const CODE: &str = "\
For code examples use a markdown code block, for example:

```python
def foo():
    print(\"Hello World!\")
```";

const SKELETON: &str = r#"<visualization type="visualization_type">
  <data>
    <item>
      <column1>value1</column1>
      <column2>value2</column2>
      ...
    </item>
    ...
  </data>
  <options>
    <!-- Optional configuration parameters -->
  </options>
</visualization>"#;

const RULES: &str = "\
IMPORTANT:
- Ensure all opening tags have a matching closing tag.
- Use consistent naming for tags (always camelCase or always snake_case, never mixed).
- Double-check that closing tags match opening tags exactly.
- Avoid errors like closing <column1> with </column>.

Validate the XML structure before responding.";

const TABLE_RULE: &str = r#"When presenting a list or tabular data (log groups, cloud resources or any other list-like
information), render it as an interactive table:

<visualization type="interactive_table">
  <data>
    <item>
      <LogGroupName>/aws/lambda/function1</LogGroupName>
      <LastEventTimestamp>2023-04-01T12:00:00Z</LastEventTimestamp>
    </item>
    <item>
      <LogGroupName>/aws/ec2/instance1</LogGroupName>
      <LastEventTimestamp>2023-04-03T09:15:00Z</LastEventTimestamp>
    </item>
  </data>
  <options>
    <title>CloudWatch Log Groups</title>
  </options>
</visualization>"#;

/// Worked examples: (heading, kind, columns, rows, title)
const EXAMPLES: [(&str, &str, [&str; 3], &[[&str; 3]], &str); 3] = [
    (
        "Bar Chart",
        "bar",
        ["x", "y", ""],
        &[["Category A", "10", ""], ["Category B", "15", ""], ["Category C", "7", ""]],
        "Sample Bar Chart",
    ),
    (
        "Scatter 3D",
        "scatter_3d",
        ["x", "y", "z"],
        &[["1", "2", "3"], ["4", "5", "6"], ["7", "8", "9"]],
        "3D Scatter Plot",
    ),
    (
        "Pie Chart",
        "pie",
        ["name", "value", ""],
        &[["Category A", "30", ""], ["Category B", "20", ""], ["Category C", "50", ""]],
        "Sample Pie Chart",
    ),
];

const CLOSING: &str = "\
Text before or after a visualization block is rendered as markdown. Choose the visualization \
type that best represents the data.

Remember: consistency and accuracy in the XML structure are crucial for rendering.";

fn example_markup(kind: &str, columns: [&str; 3], rows: &[[&str; 3]], title: &str) -> String {
    let mut out = format!("<visualization type=\"{kind}\">\n  <data>\n");
    for row in rows {
        out.push_str("    <item>\n");
        for (column, value) in columns.iter().zip(row) {
            if !column.is_empty() {
                let _ = writeln!(out, "      <{column}>{value}</{column}>");
            }
        }
        out.push_str("    </item>\n");
    }
    let _ = write!(
        out,
        "  </data>\n  <options>\n    <title>{title}</title>\n  </options>\n</visualization>"
    );
    out
}

/// Bullet list of supported kinds, one line per category group
#[must_use]
pub fn supported_kinds() -> String {
    grouped()
        .into_iter()
        .map(|(label, kinds)| {
            let names: Vec<_> = kinds.iter().map(|spec| spec.name).collect();
            format!("* {label}: {}", names.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full `<rendering_capabilities>` prompt section
#[must_use]
pub fn rendering_capabilities() -> String {
    let mut out = String::from("<rendering_capabilities>\n");
    let _ = writeln!(out, "{INTRO}\n");
    let _ = writeln!(
        out,
        "<code_visualization_capabilities>\n{CODE}\n</code_visualization_capabilities>\n"
    );
    out.push_str("<data_visualization_capabilities>\n");
    let _ = writeln!(
        out,
        "You can create graphs and tables with the following XML format:\n\n{SKELETON}\n"
    );
    let _ = writeln!(out, "{RULES}\n");
    let _ = writeln!(
        out,
        "Supported visualization types ({} in total) are:\n\n{}\n",
        KINDS.len(),
        supported_kinds()
    );
    out.push_str(
        "For most charts use \"x\" and \"y\" as column names. For tables use descriptive column names.\n\n",
    );
    let _ = writeln!(out, "<auto_table_rendering>\n{TABLE_RULE}\n</auto_table_rendering>\n");
    out.push_str("Examples of other visualizations:\n\n");
    for (index, (heading, kind, columns, rows, title)) in EXAMPLES.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {heading}:\n{}\n",
            index + 1,
            example_markup(kind, *columns, rows, title)
        );
    }
    let _ = writeln!(out, "{CLOSING}");
    out.push_str("</data_visualization_capabilities>\n</rendering_capabilities>\n");
    out
}
