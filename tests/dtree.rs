use std::collections::HashMap;
use std::env;

use minitree::prelude::*;
use rand::prelude::*;


fn golf() -> Dataset {
    let mut path = env::current_dir().unwrap();
    path.push("tests/dataset/golf.tsv");

    DatasetReader::default()
        .file(path)
        .read()
        .unwrap()
}


/// Random rows over two categorical and two numeric attributes.
/// The label mostly follows `x > 10`.
fn random_dataset(seed: u64, n_rows: usize) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let colors = ["red", "green", "blue"];
    let sizes = ["small", "large"];

    let header = ["color", "size", "x", "y", "label"].map(String::from);
    let records = (0..n_rows)
        .map(|_| {
            let color = colors[rng.gen_range(0..colors.len())];
            let size = sizes[rng.gen_range(0..sizes.len())];
            let x = rng.gen_range(0..20);
            let y = rng.gen_range(0..5);
            let noise = rng.gen_range(0..5) == 0;
            let label = if (x > 10) != noise { "yes" } else { "no" };
            vec![
                color.to_string(),
                size.to_string(),
                x.to_string(),
                y.to_string(),
                label.to_string(),
            ]
        })
        .collect::<Vec<_>>();

    Dataset::from_strings(&header, &records).unwrap()
}


fn assert_well_formed(tree: &DecisionTree) {
    for id in tree.preorder() {
        let node = tree.node(id);
        assert_eq!(node.num_items(), node.num_yes() + node.num_no());

        if node.is_leaf() {
            assert!(node.outcome().is_some());
            assert!(node.children().is_empty());
            continue;
        }

        assert!(node.split().is_some());
        assert!(node.children().len() >= 2, "internal node with < 2 children.");
        let (yes, no) = node.children()
            .iter()
            .map(|&child| tree.node(child))
            .fold((0, 0), |(y, n), child| (y + child.num_yes(), n + child.num_no()));
        assert_eq!(yes, node.num_yes());
        assert_eq!(no, node.num_no());
    }
}


/// Tests for `Id3`.
#[cfg(test)]
pub mod dtree_tests {
    use super::*;

    #[test]
    fn weather_scenario() {
        let header = ["weather", "temp", "label"];
        let records = [
            ["sunny", "70", "yes"],
            ["rainy", "50", "no"],
            ["sunny", "75", "yes"],
            ["rainy", "55", "no"],
        ];
        let dataset = Dataset::from_strings(&header, &records).unwrap();
        let id3 = Id3Builder::new().build().unwrap();
        let tree = id3.fit(&dataset).unwrap();

        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.node(tree.root()).name(), "weather");
        assert_well_formed(&tree);

        let report = LeaveOneOut::new(&dataset, &id3).run().unwrap();
        let res = report.accuracy().unwrap();
        assert_eq!(res, 1f64, "expected 1, got {res}.");
    }

    #[test]
    fn golf_from_file() {
        let dataset = golf();
        assert_eq!(dataset.shape(), (14, 4));

        let schema = dataset.schema();
        assert_eq!(schema.attribute(0).kind(), AttributeKind::Categorical);
        assert_eq!(schema.attribute(1).kind(), AttributeKind::Numeric);
        assert_eq!(schema.attribute(2).kind(), AttributeKind::Numeric);
        assert_eq!(schema.attribute(3).kind(), AttributeKind::Categorical);
        assert_eq!(schema.label(), "play");

        let tree = Id3Builder::new().build().unwrap().fit(&dataset).unwrap();
        println!("{tree}");
        assert_well_formed(&tree);
        assert_eq!(tree.node(tree.root()).name(), "outlook");
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.n_nodes(), 8);

        let sunny = tree.node(tree.root()).children()[0];
        assert_eq!(tree.node(sunny).name(), "humidity");
        assert_eq!(tree.node(sunny).threshold(), Some(70));

        for row in dataset.rows() {
            assert_eq!(tree.classify(row), Some(row.label()));
        }

        let values = HashMap::from([
            ("outlook", "rainy"),
            ("temp", "60"),
            ("humidity", "99"),
            ("windy", "true"),
        ]);
        assert_eq!(tree.classify_values(&values), Some(Outcome::No));
    }

    #[test]
    fn single_label_gives_single_leaf() {
        let header = ["a", "b", "label"];
        let records = [
            ["x", "1", "no"],
            ["y", "2", "no"],
            ["z", "3", "no"],
        ];
        let dataset = Dataset::from_strings(&header, &records).unwrap();
        let tree = Id3Builder::new().build().unwrap().fit(&dataset).unwrap();

        assert_eq!(tree.n_nodes(), 1);
        assert_eq!(tree.node(tree.root()).outcome(), Some(Outcome::No));
    }

    #[test]
    fn exclusive_or_is_learned() {
        let header = ["a", "b", "label"];
        let records = [
            ["x", "p", "no"],
            ["x", "q", "yes"],
            ["y", "p", "yes"],
            ["y", "q", "no"],
            ["x", "p", "no"],
            ["x", "q", "yes"],
            ["y", "p", "yes"],
            ["y", "q", "no"],
        ];
        let dataset = Dataset::from_strings(&header, &records).unwrap();
        let tree = Id3Builder::new().build().unwrap().fit(&dataset).unwrap();
        assert_well_formed(&tree);
        assert_eq!(tree.depth(), 2);

        let correct = dataset.rows()
            .iter()
            .filter(|row| tree.classify(row) == Some(row.label()))
            .count();
        assert_eq!(correct, dataset.len());
    }

    #[test]
    fn random_trees_conserve_counts() {
        for seed in 0..10 {
            let dataset = random_dataset(seed, 60);
            let tree = Id3Builder::new().build().unwrap().fit(&dataset).unwrap();
            assert_well_formed(&tree);

            let root = tree.node(tree.root());
            assert_eq!(root.num_items(), dataset.len());
        }
    }

    #[test]
    fn pure_leaves_classify_training_rows() {
        let mut checked = 0;
        for seed in 0..20 {
            let dataset = random_dataset(seed, 40);
            let tree = Id3Builder::new().build().unwrap().fit(&dataset).unwrap();

            let pure = tree.leaves()
                .into_iter()
                .all(|leaf| {
                    let leaf = tree.node(leaf);
                    leaf.num_yes() == 0 || leaf.num_no() == 0
                });
            if !pure { continue; }

            checked += 1;
            for row in dataset.rows() {
                assert_eq!(tree.classify(row), Some(row.label()));
            }
        }
        println!("checked {checked} trees with pure leaves");
    }

    #[test]
    fn dot_and_json() {
        let dataset = golf();
        let tree = Id3Builder::new().build().unwrap().fit(&dataset).unwrap();

        let mut path = env::temp_dir();
        path.push(format!("minitree-golf-{}.dot", std::process::id()));
        tree.to_dot_file(&path, Some("golf")).unwrap();
        let dot = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(dot.starts_with("graph DecisionTree {"));
        assert!(dot.contains("\tnode_0 [ label = \"outlook\" ];\n"));
        assert!(dot.contains("[ label = \"<= 70\" ]"));
        assert_eq!(dot.matches("shape = box").count(), tree.leaves().len());

        let json = tree.to_json().unwrap();
        let back = DecisionTree::from_json(&json).unwrap();
        assert_eq!(tree, back);
    }
}
