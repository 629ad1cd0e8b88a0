use crate::utils::{init_tracing, parse};
use serpent::{CompileOptions, SourceUnit, compile_project, imports_of};

#[test]
fn test_imports_of() {
    let tree = parse("import os.path as p, sys\nfrom .pkg import mod as m\n");
    assert_eq!(imports_of(&tree), ["os.path", "sys", "pkg", "pkg.mod"]);
}

#[test]
fn test_imports_inside_functions() {
    let tree = parse("def f():\n    import json\n    return json\n");
    assert_eq!(imports_of(&tree), ["json"]);
}

#[test]
fn test_project_follows_imports() -> anyhow::Result<()> {
    init_tracing();
    let units = vec![
        SourceUnit::new("app", "app.py", "import util\nimport os\nprint(1)\n"),
        SourceUnit::new("util", "util.py", "from base import y\nx = 1\n"),
        SourceUnit::new("base", "base.py", "y = 2\n"),
    ];
    let compiled = compile_project(&units, &CompileOptions::default())?;
    let order: Vec<&str> = compiled.iter().map(|unit| unit.module.as_str()).collect();
    assert_eq!(order, ["base", "util", "app"]);

    assert_eq!(compiled[0].line_map.entries[0].id, 0);
    for pair in compiled.windows(2) {
        assert_eq!(pair[1].line_map.entries[0].id, pair[0].line_map.next_id());
    }
    assert_eq!(compiled[2].code, "console.log(1);\n");
    Ok(())
}

#[test]
fn test_unrelated_units_keep_their_order() -> anyhow::Result<()> {
    init_tracing();
    let units = vec![
        SourceUnit::new("b", "b.py", "x = 1\n"),
        SourceUnit::new("a", "a.py", "y = 2\n"),
    ];
    let compiled = compile_project(&units, &CompileOptions::default())?;
    let order: Vec<&str> = compiled.iter().map(|unit| unit.module.as_str()).collect();
    assert_eq!(order, ["b", "a"]);
    Ok(())
}

#[test]
fn test_import_cycle_is_an_error() {
    init_tracing();
    let units = vec![
        SourceUnit::new("a", "a.py", "import b\n"),
        SourceUnit::new("b", "b.py", "import a\n"),
    ];
    let err = compile_project(&units, &CompileOptions::default()).unwrap_err();
    assert!(err.to_string().contains("cycle"), "{err}");
}

#[test]
fn test_self_import_is_ignored() -> anyhow::Result<()> {
    init_tracing();
    let units = vec![SourceUnit::new("solo", "solo.py", "import solo\nx = 1\n")];
    let compiled = compile_project(&units, &CompileOptions::default())?;
    assert_eq!(compiled.len(), 1);
    assert_eq!(compiled[0].code, "x = 1;\n");
    Ok(())
}
