use crate::errors::ProtocolError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// ========================================
/// Reply markup grammar
/// ========================================
///
/// The prompt teaches these shapes to the model; the downstream interpreter
/// parses them back out of replies. Rendering and parsing live side by side so
/// the two cannot drift.

pub const QUICK_ACTIONS_TAG: &str = "bolt-quick-actions";
pub const QUICK_ACTION_TAG: &str = "bolt-quick-action";
pub const MAX_QUICK_ACTIONS: usize = 5;
pub const MIGRATIONS_DIR: &str = "/supabase/migrations";
pub const PROJECT_ID_PLACEHOLDER: &str = "${projectId}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuickActionKind {
    Implement,
    Message,
    Link,
    File,
}

impl QuickActionKind {
    /// Presentation order inside a quick actions block.
    pub const PRECEDENCE: [QuickActionKind; 4] = [
        QuickActionKind::Implement,
        QuickActionKind::Message,
        QuickActionKind::Link,
        QuickActionKind::File,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuickActionKind::Implement => "implement",
            QuickActionKind::Message => "message",
            QuickActionKind::Link => "link",
            QuickActionKind::File => "file",
        }
    }

    /// The one attribute each kind must carry besides `type`.
    pub fn required_attribute(self) -> &'static str {
        match self {
            QuickActionKind::Implement | QuickActionKind::Message => "message",
            QuickActionKind::Link => "href",
            QuickActionKind::File => "path",
        }
    }

    fn rank(self) -> usize {
        Self::PRECEDENCE.iter().position(|k| *k == self).unwrap_or(usize::MAX)
    }
}

impl fmt::Display for QuickActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuickActionKind {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "implement" => Ok(QuickActionKind::Implement),
            "message" => Ok(QuickActionKind::Message),
            "link" => Ok(QuickActionKind::Link),
            "file" => Ok(QuickActionKind::File),
            other => Err(ProtocolError::UnknownActionType(other.to_string())),
        }
    }
}

/// One button in the quick actions block. `value` is the payload of the
/// kind's required attribute (message text, href or path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub kind: QuickActionKind,
    pub value: String,
    pub label: String,
}

impl QuickAction {
    pub fn new(kind: QuickActionKind, value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { kind, value: value.into(), label: label.into() }
    }

    pub fn render(&self) -> String {
        format!(
            "<{tag} type=\"{kind}\" {attr}=\"{value}\">{label}</{tag}>",
            tag = QUICK_ACTION_TAG,
            kind = self.kind,
            attr = self.kind.required_attribute(),
            value = escape_attr(&self.value),
            label = self.label,
        )
    }
}

/// Render a full block, one action per line, at the given indent.
pub fn render_quick_actions(actions: &[QuickAction], indent: usize) -> String {
    let pad = " ".repeat(indent);
    let mut s = format!("{pad}<{QUICK_ACTIONS_TAG}>\n");
    for a in actions {
        s.push_str(&pad);
        s.push_str("  ");
        s.push_str(&a.render());
        s.push('\n');
    }
    s.push_str(&format!("{pad}</{QUICK_ACTIONS_TAG}>"));
    s
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum DbOperation {
    Migration { file_path: String },
    Query { project_id: String },
}

/// A `<boltAction type="supabase">` block. `body` is stored dedented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseAction {
    #[serde(flatten)]
    pub operation: DbOperation,
    pub body: String,
}

impl DatabaseAction {
    pub fn render(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        let (op, attr, value) = match &self.operation {
            DbOperation::Migration { file_path } => ("migration", "filePath", file_path.as_str()),
            DbOperation::Query { project_id } => ("query", "projectId", project_id.as_str()),
        };
        let mut s = format!("{pad}<boltAction type=\"supabase\" operation=\"{op}\" {attr}=\"{value}\">\n");
        for line in self.body.lines() {
            if !line.is_empty() {
                s.push_str(&pad);
                s.push_str("  ");
                s.push_str(line);
            }
            s.push('\n');
        }
        s.push_str(&pad);
        s.push_str("</boltAction>");
        s
    }
}

/// A schema change expressed the only way the interpreter accepts it:
/// a migration file plus an immediate query, both carrying the same SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaChange {
    pub id: String,
    pub title: String,
    pub file_name: String,
    pub sql: String,
}

impl SchemaChange {
    pub fn migration_path(&self) -> String {
        format!("{MIGRATIONS_DIR}/{}", self.file_name)
    }

    pub fn actions(&self) -> [DatabaseAction; 2] {
        [
            DatabaseAction {
                operation: DbOperation::Migration { file_path: self.migration_path() },
                body: self.sql.clone(),
            },
            DatabaseAction {
                operation: DbOperation::Query { project_id: PROJECT_ID_PLACEHOLDER.into() },
                body: self.sql.clone(),
            },
        ]
    }

    pub fn render_artifact(&self, indent: usize) -> String {
        let pad = " ".repeat(indent);
        let [migration, query] = self.actions();
        format!(
            "{pad}<boltArtifact id=\"{id}\" title=\"{title}\">\n{m}\n\n{q}\n{pad}</boltArtifact>",
            id = self.id,
            title = self.title,
            m = migration.render(indent + 2),
            q = query.render(indent + 2),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub title: String,
    pub actions: Vec<DatabaseAction>,
}

/// ========================================
/// Reply parsing
/// ========================================

fn quick_actions_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<bolt-quick-actions>(.*?)</bolt-quick-actions>").expect("static regex")
    })
}

fn quick_action_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"<bolt-quick-action\s+([^>]*)>([^<]*)</bolt-quick-action>").expect("static regex")
    })
}

fn attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"([A-Za-z][A-Za-z0-9_-]*)="([^"]*)""#).expect("static regex"))
}

fn artifact_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<boltArtifact\s+id="([^"]*)"\s+title="([^"]*)"\s*>(.*?)</boltArtifact>"#)
            .expect("static regex")
    })
}

fn db_action_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<boltAction\s+type="supabase"\s+operation="(migration|query)"\s+(filePath|projectId)="([^"]*)"\s*>(.*?)</boltAction>"#,
        )
        .expect("static regex")
    })
}

/// Parse and validate the quick actions block a reply must close with.
pub fn parse_quick_actions(reply: &str) -> Result<Vec<QuickAction>, ProtocolError> {
    let trimmed = reply.trim_end();
    if !trimmed.ends_with(&format!("</{QUICK_ACTIONS_TAG}>")) {
        return Err(ProtocolError::MissingQuickActions);
    }
    let block = quick_actions_block_re()
        .captures_iter(trimmed)
        .last()
        .and_then(|c| c.get(1))
        .ok_or(ProtocolError::MissingQuickActions)?
        .as_str();

    let leftover = quick_action_re().replace_all(block, "");
    if !leftover.trim().is_empty() {
        return Err(ProtocolError::MalformedQuickAction(leftover.trim().to_string()));
    }

    let mut actions = Vec::new();
    for cap in quick_action_re().captures_iter(block) {
        let attrs: Vec<(&str, &str)> = attr_re()
            .captures_iter(&cap[1])
            .filter_map(|a| Some((a.get(1)?.as_str(), a.get(2)?.as_str())))
            .collect();

        let kind_raw = attrs
            .iter()
            .find(|(k, _)| *k == "type")
            .map(|(_, v)| *v)
            .ok_or_else(|| ProtocolError::MalformedQuickAction(cap[0].to_string()))?;
        let kind: QuickActionKind = kind_raw.parse()?;

        let expected = kind.required_attribute();
        let value = match attrs.iter().find(|(k, _)| *k == expected) {
            Some((_, v)) => unescape_attr(v),
            None => {
                let found = attrs
                    .iter()
                    .map(|(k, _)| *k)
                    .find(|k| *k != "type")
                    .unwrap_or("none");
                return Err(ProtocolError::WrongAttribute {
                    kind: kind.to_string(),
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        };

        actions.push(QuickAction::new(kind, value, cap[2].trim()));
    }

    validate_quick_actions(&actions)?;
    Ok(actions)
}

/// Count limits and implement, message, link, file ordering.
pub fn validate_quick_actions(actions: &[QuickAction]) -> Result<(), ProtocolError> {
    if actions.is_empty() {
        return Err(ProtocolError::EmptyQuickActions);
    }
    if actions.len() > MAX_QUICK_ACTIONS {
        return Err(ProtocolError::TooManyQuickActions(actions.len()));
    }
    for (i, pair) in actions.windows(2).enumerate() {
        if pair[1].kind.rank() < pair[0].kind.rank() {
            return Err(ProtocolError::OutOfOrder { kind: pair[1].kind.to_string(), position: i + 2 });
        }
    }
    Ok(())
}

/// Extract every `<boltArtifact>` with the database actions it contains.
/// A migration must target `filePath` and a query `projectId`.
pub fn parse_artifacts(text: &str) -> Result<Vec<Artifact>, ProtocolError> {
    let mut artifacts = Vec::new();
    for cap in artifact_re().captures_iter(text) {
        let id = cap[1].to_string();
        let mut actions = Vec::new();
        for a in db_action_re().captures_iter(&cap[3]) {
            let (op, attr, target) = (&a[1], &a[2], a[3].to_string());
            let expected = if op == "migration" { "filePath" } else { "projectId" };
            if attr != expected {
                return Err(ProtocolError::WrongTarget {
                    artifact: id,
                    operation: op.to_string(),
                    expected: expected.to_string(),
                    found: attr.to_string(),
                });
            }
            let operation = match op {
                "migration" => DbOperation::Migration { file_path: target },
                _ => DbOperation::Query { project_id: target },
            };
            actions.push(DatabaseAction { operation, body: normalize_body(&a[4]) });
        }
        artifacts.push(Artifact { id, title: cap[2].to_string(), actions });
    }
    Ok(artifacts)
}

/// Enforce the dual-action rule: every migration lives under the migrations
/// directory and is immediately followed by a query with identical SQL, and no
/// query stands alone.
pub fn check_pairing(artifact: &Artifact) -> Result<usize, ProtocolError> {
    let mut pairs = 0;
    let mut iter = artifact.actions.iter();
    while let Some(action) = iter.next() {
        match &action.operation {
            DbOperation::Migration { file_path } if !is_migration_path(file_path) => {
                return Err(ProtocolError::MigrationOutsideDir {
                    artifact: artifact.id.clone(),
                    file_path: file_path.clone(),
                })
            }
            DbOperation::Migration { file_path } => match iter.next() {
                Some(DatabaseAction { operation: DbOperation::Query { .. }, body }) => {
                    if *body != action.body {
                        return Err(ProtocolError::BodyMismatch {
                            artifact: artifact.id.clone(),
                            file_path: file_path.clone(),
                        });
                    }
                    pairs += 1;
                }
                _ => {
                    return Err(ProtocolError::UnpairedMigration {
                        artifact: artifact.id.clone(),
                        file_path: file_path.clone(),
                    })
                }
            },
            DbOperation::Query { .. } => {
                return Err(ProtocolError::UnpairedQuery { artifact: artifact.id.clone() })
            }
        }
    }
    Ok(pairs)
}

/// A file directly or indirectly under `/supabase/migrations/`, without `..` segments.
fn is_migration_path(file_path: &str) -> bool {
    file_path
        .strip_prefix(MIGRATIONS_DIR)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|rest| !rest.is_empty() && !rest.split('/').any(|seg| seg.is_empty() || seg == ".."))
}

/// Drop the blank first/last lines around a body and strip the common indent.
fn normalize_body(raw: &str) -> String {
    let lines: Vec<&str> = raw.lines().collect();
    let start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|l| !l.trim().is_empty()).map(|i| i + 1).unwrap_or(start);
    let body = &lines[start..end];
    let indent = body
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| l.len() - l.trim_start().len())
        .min()
        .unwrap_or(0);
    body.iter()
        .map(|l| l.get(indent..).unwrap_or_else(|| l.trim_start()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;").replace('<', "&lt;").replace('>', "&gt;")
}

fn unescape_attr(s: &str) -> String {
    s.replace("&quot;", "\"").replace("&lt;", "<").replace("&gt;", ">").replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users_table() -> SchemaChange {
        SchemaChange {
            id: "create-users-table".into(),
            title: "Create Users Table".into(),
            file_name: "create_users.sql".into(),
            sql: "CREATE TABLE users (\n  id uuid PRIMARY KEY\n);".into(),
        }
    }

    #[test]
    fn quick_action_renders_required_attribute() {
        let link = QuickAction::new(QuickActionKind::Link, "https://supabase.com/docs", "Open Supabase docs");
        assert_eq!(
            link.render(),
            r#"<bolt-quick-action type="link" href="https://supabase.com/docs">Open Supabase docs</bolt-quick-action>"#
        );
        let file = QuickAction::new(QuickActionKind::File, "src/App.tsx", "Open App.tsx");
        assert!(file.render().contains(r#"path="src/App.tsx""#));
    }

    #[test]
    fn parses_well_formed_reply() {
        let reply = format!(
            "## The Plan\n1. Do it\n\n{}\n",
            render_quick_actions(
                &[
                    QuickAction::new(QuickActionKind::Implement, "Implement the plan", "Implement this plan"),
                    QuickAction::new(QuickActionKind::Message, "Say \"hi\"", "Say hi"),
                    QuickAction::new(QuickActionKind::File, "src/main.tsx", "main.tsx"),
                ],
                0
            )
        );
        let actions = parse_quick_actions(&reply).unwrap();
        assert_eq!(actions.len(), 3);
        assert_eq!(actions[1].value, "Say \"hi\"");
        assert_eq!(actions[2].kind, QuickActionKind::File);
    }

    #[test]
    fn rejects_reply_without_trailing_block() {
        let reply = "<bolt-quick-actions><bolt-quick-action type=\"message\" message=\"x\">x</bolt-quick-action></bolt-quick-actions>\nmore text";
        assert_eq!(parse_quick_actions(reply), Err(ProtocolError::MissingQuickActions));
    }

    #[test]
    fn rejects_out_of_order_actions() {
        let reply = render_quick_actions(
            &[
                QuickAction::new(QuickActionKind::Message, "m", "m"),
                QuickAction::new(QuickActionKind::Implement, "i", "i"),
            ],
            0,
        );
        assert_eq!(
            parse_quick_actions(&reply),
            Err(ProtocolError::OutOfOrder { kind: "implement".into(), position: 2 })
        );
    }

    #[test]
    fn rejects_wrong_attribute_and_unknown_type() {
        let wrong = "<bolt-quick-actions><bolt-quick-action type=\"link\" path=\"x\">x</bolt-quick-action></bolt-quick-actions>";
        assert_eq!(
            parse_quick_actions(wrong),
            Err(ProtocolError::WrongAttribute { kind: "link".into(), expected: "href".into(), found: "path".into() })
        );
        let unknown = "<bolt-quick-actions><bolt-quick-action type=\"deploy\" message=\"x\">x</bolt-quick-action></bolt-quick-actions>";
        assert_eq!(parse_quick_actions(unknown), Err(ProtocolError::UnknownActionType("deploy".into())));
    }

    #[test]
    fn enforces_action_count() {
        let six: Vec<_> = (0..6).map(|i| QuickAction::new(QuickActionKind::Message, format!("m{i}"), "m")).collect();
        assert_eq!(
            parse_quick_actions(&render_quick_actions(&six, 0)),
            Err(ProtocolError::TooManyQuickActions(6))
        );
        assert_eq!(
            parse_quick_actions("<bolt-quick-actions>\n</bolt-quick-actions>"),
            Err(ProtocolError::EmptyQuickActions)
        );
    }

    #[test]
    fn schema_change_round_trips_through_artifact_parser() {
        let change = users_table();
        let artifacts = parse_artifacts(&change.render_artifact(4)).unwrap();
        assert_eq!(artifacts.len(), 1);
        let artifact = &artifacts[0];
        assert_eq!(artifact.id, "create-users-table");
        assert_eq!(artifact.actions.len(), 2);
        assert_eq!(artifact.actions[0].body, change.sql);
        assert_eq!(
            artifact.actions[0].operation,
            DbOperation::Migration { file_path: "/supabase/migrations/create_users.sql".into() }
        );
        assert_eq!(check_pairing(artifact), Ok(1));
    }

    #[test]
    fn pairing_detects_mismatch_and_orphans() {
        let migration = DatabaseAction {
            operation: DbOperation::Migration { file_path: "/supabase/migrations/a.sql".into() },
            body: "SELECT 1;".into(),
        };
        let query = |body: &str| DatabaseAction {
            operation: DbOperation::Query { project_id: PROJECT_ID_PLACEHOLDER.into() },
            body: body.into(),
        };

        let mismatch = Artifact { id: "a".into(), title: "A".into(), actions: vec![migration.clone(), query("SELECT 2;")] };
        assert!(matches!(check_pairing(&mismatch), Err(ProtocolError::BodyMismatch { .. })));

        let orphan = Artifact { id: "a".into(), title: "A".into(), actions: vec![migration] };
        assert!(matches!(check_pairing(&orphan), Err(ProtocolError::UnpairedMigration { .. })));

        let lone_query = Artifact { id: "a".into(), title: "A".into(), actions: vec![query("SELECT 1;")] };
        assert_eq!(check_pairing(&lone_query), Err(ProtocolError::UnpairedQuery { artifact: "a".into() }));
    }

    #[test]
    fn rejects_swapped_action_targets() {
        let reply = r#"<boltArtifact id="swap" title="Swap">
  <boltAction type="supabase" operation="migration" projectId="${projectId}">
    SELECT 1;
  </boltAction>
  <boltAction type="supabase" operation="query" filePath="/supabase/migrations/a.sql">
    SELECT 1;
  </boltAction>
</boltArtifact>"#;
        assert_eq!(
            parse_artifacts(reply),
            Err(ProtocolError::WrongTarget {
                artifact: "swap".into(),
                operation: "migration".into(),
                expected: "filePath".into(),
                found: "projectId".into(),
            })
        );

        let query_only = reply.replacen(r#"operation="migration" projectId="${projectId}""#, r#"operation="migration" filePath="/supabase/migrations/a.sql""#, 1);
        assert_eq!(
            parse_artifacts(&query_only),
            Err(ProtocolError::WrongTarget {
                artifact: "swap".into(),
                operation: "query".into(),
                expected: "projectId".into(),
                found: "filePath".into(),
            })
        );
    }

    #[test]
    fn migration_must_live_under_migrations_dir() {
        let pair = |path: &str| Artifact {
            id: "m".into(),
            title: "M".into(),
            actions: vec![
                DatabaseAction { operation: DbOperation::Migration { file_path: path.into() }, body: "SELECT 1;".into() },
                DatabaseAction {
                    operation: DbOperation::Query { project_id: PROJECT_ID_PLACEHOLDER.into() },
                    body: "SELECT 1;".into(),
                },
            ],
        };
        assert_eq!(check_pairing(&pair("/supabase/migrations/a.sql")), Ok(1));
        for bad in ["/src/a.sql", "/supabase/migrations", "/supabase/migrations/", "/supabase/migrationsx/a.sql", "/supabase/migrations/../seed.sql"] {
            assert_eq!(
                check_pairing(&pair(bad)),
                Err(ProtocolError::MigrationOutsideDir { artifact: "m".into(), file_path: bad.into() }),
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_quick_actions_the_parser_cannot_read() {
        let self_closing = "<bolt-quick-actions>\n  <bolt-quick-action type=\"implement\" message=\"go\">Go</bolt-quick-action>\n  <bolt-quick-action type=\"message\" message=\"x\"/>\n</bolt-quick-actions>";
        assert_eq!(
            parse_quick_actions(self_closing),
            Err(ProtocolError::MalformedQuickAction(r#"<bolt-quick-action type="message" message="x"/>"#.into()))
        );

        let unclosed = "<bolt-quick-actions>\n  <bolt-quick-action type=\"message\" message=\"x\">x\n</bolt-quick-actions>";
        assert!(matches!(parse_quick_actions(unclosed), Err(ProtocolError::MalformedQuickAction(_))));

        let stray = "<bolt-quick-actions>\n  <bolt-quick-action type=\"message\" message=\"x\">x</bolt-quick-action>\n  extra\n</bolt-quick-actions>";
        assert_eq!(parse_quick_actions(stray), Err(ProtocolError::MalformedQuickAction("extra".into())));
    }
}
