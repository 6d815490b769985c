use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};

use bilingua_config::Config;
use bilingua_core::prune::{DictionarySink, Pruner};
use bilingua_core::{Dictionary, DictionaryError, HintStyle};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

use crate::archive::Archiver;
use crate::console::Console;
use crate::controller::{AppController, prune_until_exit, translate};

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<contentList>
  <content contentuid="h1" version="1">The dragon sleeps</content>
  <content contentuid="h2" version="1">Nothing to see</content>
</contentList>
"#;

const DICTIONARY: &str = "dragon\tдракон\t40\nsleeps\tспит\t3\nthe\t`NULL`\t900\n";

/// Treats the archive as the bare document file
#[derive(Clone, Default)]
struct FakeArchiver {
    packed: Arc<Mutex<Vec<String>>>,
}

impl FakeArchiver {
    fn document_in(dir: &Path) -> std::path::PathBuf {
        Config::default()
            .paths
            .document
            .split('/')
            .fold(dir.to_path_buf(), |path, part| path.join(part))
    }
}

impl Archiver for FakeArchiver {
    fn unpack(&self, archive: &Path, output_dir: &Path) -> anyhow::Result<()> {
        let document = Self::document_in(output_dir);
        fs::create_dir_all(document.parent().unwrap())?;
        fs::copy(archive, document)?;
        Ok(())
    }

    fn pack(&self, source_dir: &Path, archive: &Path, compression: &str) -> anyhow::Result<()> {
        fs::copy(Self::document_in(source_dir), archive)?;
        self.packed.lock().unwrap().push(compression.to_string());
        Ok(())
    }
}

fn workspace(dictionary: &str) -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.paths.app_dir = dir.path().to_path_buf();
    config.game.launch = false;

    fs::write(config.paths.archive(), DOCUMENT).unwrap();
    fs::create_dir_all(config.paths.dictionary().parent().unwrap()).unwrap();
    fs::write(config.paths.dictionary(), dictionary).unwrap();

    (dir, config)
}

#[test]
fn translate_annotates_and_repacks() {
    let (_dir, config) = workspace(DICTIONARY);
    let controller = AppController::new(config.clone());
    let mut session = controller.load_session(false).unwrap().unwrap();
    let archiver = FakeArchiver::default();

    let stats = translate(&config.paths, "lz4", &archiver, &mut session).unwrap();
    let packed = fs::read_to_string(config.paths.archive()).unwrap();

    assert_eq!(stats.nodes, 2);
    assert_eq!(stats.annotated, 1);
    assert!(packed.contains("dragon&lt;/font&gt;"));
    assert!(packed.contains("Nothing to see</content>"));
    assert_eq!(fs::read_to_string(config.paths.origin_archive()).unwrap(), DOCUMENT);
    assert!(!config.paths.package_dir().exists());
    assert_eq!(*archiver.packed.lock().unwrap(), ["lz4"]);
}

#[test]
fn repeated_runs_start_from_the_origin_archive() {
    let (_dir, config) = workspace(DICTIONARY);
    let controller = AppController::new(config.clone());
    let archiver = FakeArchiver::default();

    for _ in 0..2 {
        let mut session = controller.load_session(false).unwrap().unwrap();
        translate(&config.paths, "lz4", &archiver, &mut session).unwrap();
    }

    let packed = fs::read_to_string(config.paths.archive()).unwrap();
    assert_eq!(packed.matches("dragon&lt;/font&gt;").count(), 1);
}

#[test]
fn empty_dictionary_stops_quietly() {
    let (_dir, config) = workspace("\n\nmalformed line\n");
    let controller = AppController::new(config);

    assert!(controller.load_session(true).unwrap().is_none());
}

#[test]
fn missing_dictionary_is_fatal() {
    let (_dir, config) = workspace(DICTIONARY);
    fs::remove_file(config.paths.dictionary()).unwrap();
    let controller = AppController::new(config);

    assert!(controller.load_session(false).is_err());
}

#[test]
fn unknown_style_disables_hints() {
    let (_dir, mut config) = workspace(DICTIONARY);
    config.annotation.style = "rainbow".to_string();
    let controller = AppController::new(config);

    let session = controller.load_session(false).unwrap().unwrap();

    assert_eq!(session.style, HintStyle::Disabled);
}

#[tokio::test]
async fn run_without_game_saves_new_words() {
    let (_dir, config) = workspace(DICTIONARY);
    let controller = AppController::new(config.clone());

    controller.run(FakeArchiver::default(), true).await.unwrap();

    let new_words = fs::read_to_string(config.paths.new_dictionary()).unwrap();
    assert_eq!(
        new_words,
        "dragon\t`NULL`\t1\nsleeps\t`NULL`\t1\nthe\t`NULL`\t1\n"
    );
    // the live dictionary is only rewritten by pruning
    assert_eq!(fs::read_to_string(config.paths.dictionary()).unwrap(), DICTIONARY);
    assert_eq!(Dictionary::load(&config.paths.dictionary()).unwrap().len(), 3);
}

#[tokio::test]
async fn run_with_empty_dictionary_touches_nothing() {
    let (_dir, config) = workspace("");
    let controller = AppController::new(config.clone());

    controller.run(FakeArchiver::default(), true).await.unwrap();

    assert_eq!(fs::read_to_string(config.paths.archive()).unwrap(), DOCUMENT);
    assert!(!config.paths.origin_archive().exists());
    assert!(!config.paths.new_dictionary().exists());
}

struct FailingSink;

impl DictionarySink for FailingSink {
    fn persist(&mut self, _dictionary: &Dictionary) -> Result<(), DictionaryError> {
        Err(io::Error::other("disk full").into())
    }
}

#[tokio::test]
async fn summary_is_shown_even_when_last_save_fails() {
    let mut live = Dictionary::parse(DICTIONARY);
    let mut pruner = Pruner::new(&mut live, FailingSink);
    pruner.prune_line("dragon");

    let (_tx, rx) = kanal::unbounded_async::<String>();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let mut output = Vec::new();
    let result = {
        let mut console = Console::with_writer(&mut output, false);
        prune_until_exit(&mut pruner, rx, cancel, &mut console).await
    };

    let printed = String::from_utf8(output).unwrap();
    assert!(result.is_err());
    assert!(printed.contains("Dictionary reduced by 1"));
    assert!(printed.contains("Current word count: 2"));
}

#[tokio::test]
async fn prune_until_exit_echoes_lines() {
    let mut live = Dictionary::parse(DICTIONARY);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("en-ru.dic");
    let mut pruner = Pruner::new(&mut live, bilingua_core::FileSink::new(&path));

    let (tx, rx) = kanal::unbounded_async::<String>();
    let cancel = CancellationToken::new();
    tx.send("Dragon goblin".to_string()).await.unwrap();

    let stopper = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            cancel.cancel();
        })
    };

    let mut output = Vec::new();
    let summary = {
        let mut console = Console::with_writer(&mut output, false);
        prune_until_exit(&mut pruner, rx, cancel, &mut console)
            .await
            .unwrap()
    };
    stopper.await.unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert_eq!(summary.deleted, 1);
    assert!(printed.starts_with("dragon[40] goblin[0] \n"));
    assert!(!fs::read_to_string(&path).unwrap().contains("dragon"));
}
