// Quick demo: build a two-stage toy grammar in memory, look words up and
// verify it against a fixture with deliberate drift in it.
use morfa_fst::table::{TableEngine, TableFst};
use morfa_harness::cascade::Cascade;
use morfa_harness::fixture::ExpectedAnalyses;

fn main() {
    let lexicon = TableFst::from_pairs([
        ("cat", "cat+SG"),
        ("cats", "cat+PL"),
        ("fish", "fish+SG"),
        ("fish", "fish+PL"),
    ]);
    let tags = TableFst::from_pairs([
        ("cat+SG", "cat+N+Sg"),
        ("cat+PL", "cat+N+Pl"),
        ("fish+SG", "fish+N+Sg"),
        ("fish+PL", "fish+N+Pl"),
    ]);

    let mut cascade = Cascade::new(TableEngine::new());
    cascade.push(lexicon);
    cascade.compose_on_top(tags).expect("lexicon is already pushed");
    println!("cascade depth: {}", cascade.depth());

    for word in ["cat", "cats", "fish", "unicorn"] {
        match cascade.lookup(word) {
            Ok(analyses) => println!("{:10} {}", word, analyses.join(" | ")),
            Err(err) => println!("{:10} ({})", word, err),
        }
    }

    let mut expected = ExpectedAnalyses::new();
    expected.insert("cat", "cat+N+Sg");
    expected.insert("cats", "cat+N+Pl");
    expected.insert("fish", "fish+N+Sg");
    expected.insert("moose", "moose+N+Sg");

    let report = cascade.verify(&expected).expect("cascade is not empty");
    println!(
        "\nchecked {} forms: {} overgenerated, {} undergenerated",
        report.checked(),
        report.over_count(),
        report.under_count()
    );
    for m in report.overgenerated() {
        println!("  over:  {} {}", m.surface(), m.analysis());
    }
    for m in report.undergenerated() {
        println!("  under: {} {}", m.surface(), m.analysis());
    }
    println!("error rate: {:.2}", report.error_rate());
}
