use exprchain::{TypeModel, ensure_member_path, get_chain, null_check, parse_lambda};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let model = TypeModel::from_json_str(include_str!("../tests/data/people.json"))?;

    for src in [
        "p: Person => p.Address.Country.Name",
        "p: Person => p.Manager.Primary().City",
        "p: Person => p.FullName()",
    ] {
        let lambda = parse_lambda(src, &model)?;
        println!("{lambda}");
        for link in get_chain(lambda.body()) {
            println!("  {} -> {}", link.member, link.expression.ty());
        }
        match ensure_member_path(&lambda, "lambda") {
            Ok(()) => println!("  member path"),
            Err(e) => println!("  {e}"),
        }
        println!("  null-safe: {}", null_check(lambda.body(), None));
    }

    Ok(())
}
