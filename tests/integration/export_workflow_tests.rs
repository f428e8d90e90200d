/*!
 * End-to-end tests for the export pipeline
 */

use anyhow::Result;
use std::collections::HashSet;
use std::path::PathBuf;

use doku2tiddly::app_config::Config;
use doku2tiddly::app_controller::Controller;
use doku2tiddly::tiddler::Tiddler;

use crate::common;

fn export_config(search_dir: PathBuf, output_file: PathBuf) -> Config {
    Config {
        search_dir,
        output_file,
        ..Config::default()
    }
}

fn read_records(path: &std::path::Path) -> Result<Vec<Tiddler>> {
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Test the documented end-to-end shape: two pages in two directories with
/// TOC creation produce exactly five records in traversal order
#[test]
fn test_run_withSmallWikiTree_shouldProduceFiveRecords() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let wiki = common::create_test_wiki(temp_dir.path())?;
    let outfile = temp_dir.path().join("out.json");

    let mut config = export_config(wiki, outfile.clone());
    config.create_toc = true;

    let report = Controller::with_config(config)?.run()?;

    assert_eq!(report.files_processed, 2);
    assert_eq!(report.nodes_created, 5);
    assert_eq!(report.duplicates_renamed, 0);
    assert_eq!(report.category_collisions_resolved, 0);

    let records = read_records(&outfile)?;
    assert_eq!(records.len(), 5);

    // traversal order: TOC node, root category, root pages, then subtree
    assert_eq!(records[0].title, "TOC");
    assert_eq!(records[0].tags, "$:/tags/SideBar");
    assert_eq!(records[1].title, "wiki");
    assert_eq!(records[1].tags, "TOC");
    assert_eq!(records[2].title, "a");
    assert_eq!(records[2].tags, "wiki");
    assert_eq!(records[2].text, "''hi''");
    assert_eq!(records[3].title, "sub");
    assert_eq!(records[3].tags, "wiki");
    assert_eq!(records[4].title, "b");
    assert_eq!(records[4].tags, "sub");
    assert_eq!(records[4].text, "''bye''");

    // every record shares the batch timestamp
    assert!(records.iter().all(|r| r.created == records[0].created));

    Ok(())
}

/// Test no two records share a case-insensitive title after a run with
/// colliding page names
#[test]
fn test_run_withDuplicatePageNames_shouldKeepTitlesUnique() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let wiki = temp_dir.path().join("wiki");
    std::fs::create_dir_all(wiki.join("sub"))?;
    common::create_test_file(&wiki, "n.txt", "one")?;
    common::create_test_file(&wiki.join("sub"), "n.txt", "two")?;
    let outfile = temp_dir.path().join("out.json");

    let report = Controller::with_config(export_config(wiki, outfile.clone()))?.run()?;

    assert_eq!(report.duplicates_renamed, 1);

    let records = read_records(&outfile)?;
    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert!(titles.contains(&"n"));
    assert!(titles.contains(&"n (sub)"));

    let unique: HashSet<String> = records.iter().map(|r| r.title.to_lowercase()).collect();
    assert_eq!(unique.len(), records.len());

    Ok(())
}

/// Test a root category colliding with the TOC node keeps its name while the
/// sidebar node is renamed
#[test]
fn test_run_withRootNamedLikeToc_shouldRenameSidebarNode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let wiki = temp_dir.path().join("TOC");
    std::fs::create_dir_all(&wiki)?;
    common::create_test_file(&wiki, "a.txt", "body")?;
    let outfile = temp_dir.path().join("out.json");

    let mut config = export_config(wiki, outfile.clone());
    config.create_toc = true;

    let report = Controller::with_config(config)?.run()?;

    assert_eq!(report.category_collisions_resolved, 1);

    let records = read_records(&outfile)?;
    assert_eq!(records[0].title, "TOC ($:/tags/SideBar)");
    assert_eq!(records[1].title, "TOC");
    assert_eq!(records[1].tags, "TOC");

    Ok(())
}

/// Test two top-level categories sharing a name abort the run with no output
#[test]
fn test_run_withIrreconcilableCollision_shouldAbortWithoutOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let wiki = temp_dir.path().join("wiki");
    std::fs::create_dir_all(&wiki)?;
    // a page named like the root while the root itself is tagged as TOC
    common::create_test_file(&wiki, "wiki.txt", "body")?;
    let outfile = temp_dir.path().join("out.json");

    let mut config = export_config(wiki, outfile.clone());
    config.toc_name = "wiki".to_string();

    let result = Controller::with_config(config)?.run();

    let err = result.expect_err("colliding top-level categories must abort");
    assert!(format!("{:#}", err).contains("naming collision"));
    assert!(!outfile.exists());

    Ok(())
}

/// Test the configured ignore filename is skipped
#[test]
fn test_run_withIgnoredFilename_shouldSkipFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let wiki = temp_dir.path().join("wiki");
    std::fs::create_dir_all(&wiki)?;
    common::create_test_file(&wiki, "start.txt", "section page")?;
    common::create_test_file(&wiki, "kept.txt", "kept")?;
    let outfile = temp_dir.path().join("out.json");

    let report = Controller::with_config(export_config(wiki, outfile.clone()))?.run()?;

    assert_eq!(report.files_processed, 1);

    let records = read_records(&outfile)?;
    assert!(records.iter().all(|r| r.title != "start"));
    assert!(records.iter().any(|r| r.title == "kept"));

    Ok(())
}

/// Test an empty ignore string disables skipping
#[test]
fn test_run_withEmptyIgnore_shouldProcessEveryPage() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let wiki = temp_dir.path().join("wiki");
    std::fs::create_dir_all(&wiki)?;
    common::create_test_file(&wiki, "start.txt", "section page")?;
    let outfile = temp_dir.path().join("out.json");

    let mut config = export_config(wiki, outfile.clone());
    config.ignore_file = String::new();

    let report = Controller::with_config(config)?.run()?;

    assert_eq!(report.files_processed, 1);

    Ok(())
}

/// Test page titles are word-capitalized when configured
#[test]
fn test_run_withCapitalizeTitles_shouldCapitalizeStems() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let wiki = temp_dir.path().join("wiki");
    std::fs::create_dir_all(&wiki)?;
    common::create_test_file(&wiki, "my page.txt", "body")?;
    let outfile = temp_dir.path().join("out.json");

    let mut config = export_config(wiki, outfile.clone());
    config.capitalize_titles = true;

    Controller::with_config(config)?.run()?;

    let records = read_records(&outfile)?;
    assert!(records.iter().any(|r| r.title == "My Page"));

    Ok(())
}

/// Test the stats node summarizes the run and lands last in the output
#[test]
fn test_run_withSaveStats_shouldAppendStatsNode() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let wiki = common::create_test_wiki(temp_dir.path())?;
    let outfile = temp_dir.path().join("out.json");

    let mut config = export_config(wiki, outfile.clone());
    config.save_stats = true;

    let report = Controller::with_config(config)?
        .with_export_args("-d wiki -s")
        .run()?;

    // root category, page a, sub category, page b, stats
    assert_eq!(report.nodes_created, 5);

    let records = read_records(&outfile)?;
    let stats = records.last().expect("stats node should be last");
    assert_eq!(stats.tags, "stats");
    assert!(stats.title.starts_with("Stats - Export: "));
    assert!(stats.text.contains("''Files Processed:'' 2"));
    assert!(stats.text.contains("''Nodes Created:'' 5"));
    assert!(stats.text.contains("''Export Arguments:'' -d wiki -s"));
    assert!(stats.text.contains("''Action Log:''"));
    assert!(stats.text.contains("Processing File: a.txt"));

    Ok(())
}

/// Test synthetic marker fields appear flattened in the JSON objects
#[test]
fn test_run_withTocCreation_shouldFlattenMarkerFields() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let wiki = common::create_test_wiki(temp_dir.path())?;
    let outfile = temp_dir.path().join("out.json");

    let mut config = export_config(wiki, outfile.clone());
    config.create_toc = true;

    Controller::with_config(config)?.run()?;

    let json = std::fs::read_to_string(&outfile)?;
    // output is pretty-printed
    assert!(json.starts_with("[\n"));

    let values: Vec<serde_json::Value> = serde_json::from_str(&json)?;
    assert_eq!(values[0]["caption"], "Contents");
    assert_eq!(values[0]["list-after"], "$:/core/ui/SideBar/Open");
    assert_eq!(values[1]["toc-link"], "no");

    Ok(())
}

/// Test the syntax-test mode translates one file without touching the
/// export pipeline
#[test]
fn test_syntax_test_withSingleFile_shouldPrintTranslation() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let page = common::create_test_file(temp_dir.path(), "page.txt", "**hi**")?;

    let controller = Controller::with_config(Config::default())?;
    let translated = controller.syntax_test(&page)?;

    assert_eq!(translated, "''hi''");

    Ok(())
}
