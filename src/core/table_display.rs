// src/core/table_display.rs

//! The tabular view printed by `chop list`.

use crate::models::Configuration;
use comfy_table::{Attribute, Cell, Color, Table, presets::ASCII_FULL};

/// Placeholder shown for an account without projects or a project without machines.
pub const EMPTY_MARKER: &str = "-";

/// One cell of the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column<'a> {
    /// Same account/project as the row above; printed empty.
    Continued,
    /// Nothing exists at this level; printed as `-`.
    Missing,
    /// A name to print, highlighted when it is the active selection.
    Name {
        /// The account, project or machine name.
        name: &'a str,
        /// Whether to print the `(active)` marker.
        active: bool,
    },
}

/// One line of the listing, left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow<'a> {
    /// Account column.
    pub account: Column<'a>,
    /// Project column.
    pub project: Column<'a>,
    /// Machine column. Never [`Column::Continued`].
    pub machine: Column<'a>,
}

/// Flattens the inventory into table rows, sorted by account, project and
/// machine name. Each account and project name is only shown on its first row.
pub fn build_rows(config: &Configuration) -> Vec<ListingRow<'_>> {
    let mut rows = Vec::new();

    for (account_name, account) in &config.accounts {
        let mut account_col = Column::Name {
            name: account_name,
            active: config.is_active_account(account_name),
        };

        if account.projects.is_empty() {
            rows.push(ListingRow {
                account: account_col,
                project: Column::Missing,
                machine: Column::Missing,
            });
            continue;
        }

        let active_project = config.active_project(account_name);
        for (project_name, project) in &account.projects {
            let mut project_col = Column::Name {
                name: project_name,
                active: active_project == Some(project_name.as_str()),
            };

            if project.machines.is_empty() {
                rows.push(ListingRow {
                    account: std::mem::replace(&mut account_col, Column::Continued),
                    project: project_col,
                    machine: Column::Missing,
                });
                continue;
            }

            for machine_name in project.machines.keys() {
                rows.push(ListingRow {
                    account: std::mem::replace(&mut account_col, Column::Continued),
                    project: std::mem::replace(&mut project_col, Column::Continued),
                    machine: Column::Name {
                        name: machine_name,
                        active: false,
                    },
                });
            }
        }
    }

    rows
}

fn to_cell(column: &Column<'_>, active_color: Color) -> Cell {
    match column {
        Column::Continued => Cell::new(""),
        Column::Missing => Cell::new(EMPTY_MARKER),
        Column::Name { name, active: true } => {
            Cell::new(format!("{name} {}", t!("list.marker.active")))
                .fg(active_color)
                .add_attribute(Attribute::Bold)
        }
        Column::Name { name, active: false } => Cell::new(*name),
    }
}

/// Renders the inventory as an ACCOUNT / PROJECT / MACHINE table.
/// The active account is shown in green, active projects in cyan.
pub fn render_table(config: &Configuration) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_header(vec![
        Cell::new(t!("list.header.account")).add_attribute(Attribute::Bold),
        Cell::new(t!("list.header.project")).add_attribute(Attribute::Bold),
        Cell::new(t!("list.header.machine")).add_attribute(Attribute::Bold),
    ]);

    for row in build_rows(config) {
        table.add_row(vec![
            to_cell(&row.account, Color::Green),
            to_cell(&row.project, Color::Cyan),
            to_cell(&row.machine, Color::Reset),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(name: &str, active: bool) -> Column<'_> {
        Column::Name { name, active }
    }

    #[test]
    fn test_empty_inventory_has_no_rows() {
        assert!(build_rows(&Configuration::default()).is_empty());
    }

    #[test]
    fn test_rows_are_sorted_by_byte_order() {
        let mut config = Configuration::default();
        for account in ["beta", "Zulu", "alpha"] {
            config.add_account(account);
        }
        let rows = build_rows(&config);
        let names: Vec<_> = rows.iter().map(|r| r.account.clone()).collect();
        // Upper-case sorts before lower-case.
        assert_eq!(
            names,
            vec![name("Zulu", false), name("alpha", false), name("beta", false)]
        );
    }

    #[test]
    fn test_placeholders_and_continuations() {
        let mut config = Configuration::default();
        config.add_account("acme");
        config.set_active_account("acme").unwrap();
        config.add_project("acme", "web").unwrap();
        config.add_project("acme", "db").unwrap();
        config.set_active_project("acme", "web").unwrap();
        config.add_machine("acme", "host2").unwrap();
        config.add_machine("acme", "host1").unwrap();
        config.add_account("empty");

        let rows = build_rows(&config);

        assert_eq!(
            rows,
            vec![
                ListingRow {
                    account: name("acme", true),
                    project: name("db", false),
                    machine: Column::Missing,
                },
                ListingRow {
                    account: Column::Continued,
                    project: name("web", true),
                    machine: name("host1", false),
                },
                ListingRow {
                    account: Column::Continued,
                    project: Column::Continued,
                    machine: name("host2", false),
                },
                ListingRow {
                    account: name("empty", false),
                    project: Column::Missing,
                    machine: Column::Missing,
                },
            ]
        );
    }

    #[test]
    fn test_active_project_is_tracked_per_account() {
        let mut config = Configuration::default();
        config.add_account("a");
        config.add_account("b");
        config.add_project("a", "shared").unwrap();
        config.add_project("b", "shared").unwrap();
        config.set_active_project("b", "shared").unwrap();

        let rows = build_rows(&config);
        assert_eq!(rows[0].project, name("shared", false));
        assert_eq!(rows[1].project, name("shared", true));
    }

    #[test]
    fn test_rendered_table_contains_names_and_markers() {
        let mut config = Configuration::default();
        config.add_account("acme");
        config.set_active_account("acme").unwrap();
        let rendered = render_table(&config).to_string();
        assert!(rendered.contains("acme"));
        assert!(rendered.contains(t!("list.marker.active")));
        assert!(rendered.contains(EMPTY_MARKER));
    }
}
