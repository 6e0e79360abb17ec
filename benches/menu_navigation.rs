//! Benchmarks for the typeahead update loop
//!
//! Run with: cargo bench menu_navigation

use omnibar::candidates::{CandidateItem, StaticSource};
use omnibar::editable::InlineSurface;
use omnibar::keymap::{KeyCode, Keystroke};
use omnibar::menu::{MenuOptions, SelectionMenu};
use omnibar::{Omnibar, TypeaheadConfig};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

fn make_items(count: usize) -> Vec<CandidateItem> {
    (0..count)
        .map(|i| CandidateItem::simple(format!("item{}", i)))
        .collect()
}

#[divan::bench(args = [10, 100, 1_000])]
fn move_next_full_cycle(bencher: divan::Bencher, count: usize) {
    let mut menu = SelectionMenu::new(MenuOptions::default());
    menu.set_items(make_items(count), false);

    bencher.bench_local(|| {
        for _ in 0..count {
            menu.move_next();
        }
        divan::black_box(menu.highlighted_index());
    });
}

#[divan::bench]
fn type_query_and_commit(bencher: divan::Bencher) {
    bencher.bench_local(|| {
        let mut bar = Omnibar::new(
            InlineSurface::from_text("some text "),
            TypeaheadConfig::default(),
            StaticSource::new(make_items(200)),
        );
        bar.type_text("/item1");
        bar.press(Keystroke::key(KeyCode::Down));
        bar.press(Keystroke::key(KeyCode::Enter));
        divan::black_box(bar.surface().text());
    });
}
