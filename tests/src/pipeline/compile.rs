use crate::utils::init_tracing;
use serpent::{CompileOptions, SourceUnit, compile};
use serpent_rules::python::FLOORDIV_SNIPPET;
use sourcemap::SourceMap;

#[test]
fn test_compile_quick_start() -> anyhow::Result<()> {
    init_tracing();
    let unit = SourceUnit::new("app", "src/app.py", "print('hello')\n");
    let compiled = compile(&unit, &CompileOptions::default())?;
    assert_eq!(compiled.code, "console.log('hello');\n");
    assert_eq!(compiled.module, "app");
    assert!(compiled.snippets.is_empty());
    assert_eq!(compiled.line_map.rows.len(), 1);
    assert_eq!(compiled.source().name(), "app.py");

    let map = SourceMap::from_slice(compiled.source_map.as_bytes())?;
    assert_eq!(map.get_file(), Some("src/app.js"));
    assert_eq!(map.get_source(0), Some("src/app.py"));
    Ok(())
}

#[test]
fn test_compile_returns_snippets_separately() -> anyhow::Result<()> {
    init_tracing();
    let unit = SourceUnit::new("calc", "calc.py", "half = n // 2\n");
    let compiled = compile(&unit, &CompileOptions::default())?;
    assert_eq!(compiled.code, "half = __floordiv(n, 2);\n");
    assert_eq!(compiled.snippets, [FLOORDIV_SNIPPET]);
    Ok(())
}

#[test]
fn test_compile_error_names_module() {
    init_tracing();
    let unit = SourceUnit::new("broken", "broken.py", "x = (\n");
    let err = compile(&unit, &CompileOptions::default()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.starts_with("failed to compile module `broken`"), "{message}");
    assert!(message.contains("syntax errors in source"), "{message}");
}

#[test]
fn test_unsupported_construct_fails_compile() {
    init_tracing();
    let unit = SourceUnit::new("app", "app.py", "f = lambda: 1\n");
    let err = compile(&unit, &CompileOptions::default()).unwrap_err();
    assert!(format!("{err:#}").contains("`lambda`"));
}

#[test]
fn test_export_line_maps_of_compiled_unit() -> anyhow::Result<()> {
    init_tracing();
    let unit = SourceUnit::new("app", "src/app.py", "print(1)\n");
    let exported = compile(&unit, &CompileOptions::default())?.export_line_maps()?;
    let lines: Vec<&str> = exported.lines().collect();
    assert_eq!(lines[0], "/** Begin line maps. **/{ \"file\" : \"\", \"count\": 1 }");
    assert_eq!(lines[1], "[1,1,1,1,1,1,1,1,1,1,1,1,2,1,0,0]");
    assert_eq!(lines[2], "/** Begin file information. **/");
    assert_eq!(lines.last(), Some(&"[\"app\",1,6]"));
    Ok(())
}

#[test]
fn test_options_deserialize() -> anyhow::Result<()> {
    let options: CompileOptions =
        serde_json::from_str(r#"{ "transform": { "fresh_name_length": 6 }, "first_mapping_id": 5 }"#)?;
    assert_eq!(options.transform.fresh_name_length, 6);
    assert_eq!(options.first_mapping_id, 5);

    let defaults: CompileOptions = serde_json::from_str("{}")?;
    assert_eq!(defaults, CompileOptions::default());
    assert_eq!(defaults.transform.fresh_name_length, 20);
    Ok(())
}

#[test]
fn test_first_mapping_id_option() -> anyhow::Result<()> {
    init_tracing();
    let unit = SourceUnit::new("app", "app.py", "print(1)\n");
    let options = CompileOptions {
        first_mapping_id: 100,
        ..CompileOptions::default()
    };
    let compiled = compile(&unit, &options)?;
    assert_eq!(compiled.line_map.entries[0].id, 100);
    assert_eq!(compiled.line_map.next_id(), 103);
    Ok(())
}
