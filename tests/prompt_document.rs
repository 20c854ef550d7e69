use std::collections::BTreeMap;
use std::thread;

use vibe_prompts::prompt::{NOT_CONNECTED_REMINDER, NO_PROJECT_REMINDER};
use vibe_prompts::{
    list_variants, resolve, Credentials, DesignScheme, MarkupAllowlist, PromptError, PromptOptions,
    SupabaseConnection, TagName,
};

const ALLOWLIST_PREFIX: &str = "using only the following available HTML elements: ";

fn options(elements: &[&str], tag: &str) -> PromptOptions {
    PromptOptions {
        cwd: "/home/project".into(),
        allowed_html_elements: MarkupAllowlist::new(elements.iter().copied()).unwrap(),
        modification_tag_name: TagName::new(tag).unwrap(),
        design_scheme: None,
        supabase: None,
    }
}

fn with_supabase(connected: bool, project: bool, creds: Option<(&str, &str)>) -> PromptOptions {
    PromptOptions {
        supabase: Some(SupabaseConnection {
            is_connected: connected,
            has_selected_project: project,
            credentials: creds.map(|(url, key)| Credentials {
                supabase_url: Some(url.into()),
                anon_key: Some(key.into()),
            }),
        }),
        ..PromptOptions::default()
    }
}

fn rendered_allowlist(doc: &str) -> Vec<&str> {
    let start = doc.find(ALLOWLIST_PREFIX).expect("allowlist sentence") + ALLOWLIST_PREFIX.len();
    let end = doc[start..].find(".\n").expect("allowlist terminator");
    doc[start..start + end].split(", ").collect()
}

#[test]
fn default_scenario() {
    let doc = resolve("default", &options(&["b", "code"], "modifications")).unwrap();
    assert!(doc.contains("<modifications>"));
    assert!(doc.contains("b, code"));
    assert!(!doc.contains(NOT_CONNECTED_REMINDER));
    assert!(!doc.contains(NO_PROJECT_REMINDER));
    assert!(!doc.contains("connect to Supabase in the chat box"));
}

#[test]
fn every_variant_is_deterministic() {
    let opts = with_supabase(true, true, Some(("https://abc.supabase.co", "anon")));
    for v in list_variants() {
        let a = resolve(v.id, &opts).unwrap();
        let b = resolve(v.id, &opts.clone()).unwrap();
        assert_eq!(a, b, "variant {} is not deterministic", v.id);
    }
}

#[test]
fn unknown_variant_fails() {
    let res = resolve("not-a-real-id", &PromptOptions::default());
    assert_eq!(res, Err(PromptError::NotFound("not-a-real-id".into())));
}

#[test]
fn each_connection_state_has_exactly_its_reminder() {
    let cases = [
        (with_supabase(false, false, None), Some(NOT_CONNECTED_REMINDER)),
        (with_supabase(false, true, Some(("u", "k"))), Some(NOT_CONNECTED_REMINDER)),
        (with_supabase(true, false, None), Some(NO_PROJECT_REMINDER)),
        (with_supabase(true, true, None), None),
        (with_supabase(true, true, Some(("https://abc.supabase.co", "anon"))), None),
        (PromptOptions::default(), None),
    ];
    for (opts, expected) in cases {
        let doc = resolve("default", &opts).unwrap();
        for reminder in [NOT_CONNECTED_REMINDER, NO_PROJECT_REMINDER] {
            let count = doc.matches(reminder).count();
            let want = usize::from(expected == Some(reminder));
            assert_eq!(count, want, "reminder {reminder:?} for {:?}", opts.supabase);
        }
    }
}

#[test]
fn full_credentials_render_env_assignments() {
    let opts = with_supabase(true, true, Some(("https://abc.supabase.co", "anon-key-123")));
    let doc = resolve("default", &opts).unwrap();
    assert!(doc.lines().any(|l| l.trim() == "VITE_SUPABASE_URL=https://abc.supabase.co"));
    assert!(doc.lines().any(|l| l.trim() == "VITE_SUPABASE_ANON_KEY=anon-key-123"));
    assert!(!doc.contains("your_supabase_url"));
}

#[test]
fn incomplete_credentials_fall_back_to_placeholders() {
    let mut opts = with_supabase(true, true, Some(("https://abc.supabase.co", "")));
    let doc = resolve("default", &opts).unwrap();
    assert!(doc.lines().any(|l| l.trim() == "SUPABASE_URL=your_supabase_url"));
    assert!(doc.lines().any(|l| l.trim() == "SUPABASE_ANON_KEY=your_supabase_anon_key"));
    assert!(!doc.contains("VITE_SUPABASE_URL"));

    opts.supabase = None;
    let doc = resolve("default", &opts).unwrap();
    assert!(doc.contains("SUPABASE_URL=your_supabase_url"));
}

#[test]
fn allowlist_renders_each_element_once_in_order() {
    let supplied = ["kbd", "b", "code", "b", "ul", "kbd", "h1"];
    let doc = resolve("default", &options(&supplied, "modifications")).unwrap();
    assert_eq!(rendered_allowlist(&doc), ["kbd", "b", "code", "ul", "h1"]);
}

#[test]
fn default_allowlist_is_rendered_as_supplied() {
    let opts = PromptOptions::default();
    let doc = resolve("optimized", &opts).unwrap();
    let expected: Vec<&str> = opts.allowed_html_elements.elements().iter().map(String::as_str).collect();
    assert_eq!(rendered_allowlist(&doc), expected);
}

#[test]
fn design_scheme_directive_or_fallback() {
    let plain = resolve("default", &PromptOptions::default()).unwrap();
    assert!(plain.contains("No specific design scheme is selected."));

    let opts = PromptOptions {
        design_scheme: Some(DesignScheme {
            name: "Forest".into(),
            colors: BTreeMap::from([
                ("primary".to_string(), "#166534".to_string()),
                ("secondary".to_string(), "#4d7c0f".to_string()),
                ("background".to_string(), "#f7fee7".to_string()),
                ("text".to_string(), "#052e16".to_string()),
                ("accent".to_string(), "#ca8a04".to_string()),
            ]),
        }),
        ..PromptOptions::default()
    };
    let doc = resolve("default", &opts).unwrap();
    assert!(doc.contains("The user has selected a design scheme: Forest"));
    assert!(doc.contains(
        "  - Primary Color: #166534\n  - Secondary Color: #4d7c0f\n  - Background Color: #f7fee7\n  - Text Color: #052e16\n  - Accent Color: #ca8a04\n"
    ));
    assert!(!doc.contains("No specific design scheme is selected."));
}

#[test]
fn invalid_tag_names_never_reach_the_document() {
    for bad in ["mod ifications", "<x>", "a>b", ""] {
        assert!(matches!(TagName::new(bad), Err(PromptError::InvalidTagName(_))));
    }
}

#[test]
fn working_directory_is_substituted() {
    let opts = PromptOptions { cwd: "/workspace/shop".into(), ..PromptOptions::default() };
    let doc = resolve("default", &opts).unwrap();
    assert!(doc.contains("Current working directory: `/workspace/shop`"));
    assert!(doc.contains("`/workspace/shop/supabase/migrations`"));
    assert!(!doc.contains("/home/project"));
}

#[test]
fn concurrent_renders_are_independent() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            thread::spawn(move || {
                let opts = PromptOptions { cwd: format!("/w/{i}"), ..PromptOptions::default() };
                (opts.clone(), resolve("default", &opts).unwrap())
            })
        })
        .collect();
    for h in handles {
        let (opts, doc) = h.join().unwrap();
        assert_eq!(doc, resolve("default", &opts).unwrap());
        assert!(doc.contains(&format!("`{}`", opts.cwd)));
    }
}
