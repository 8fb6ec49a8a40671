use std::borrow::Cow;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use exprchain::{Lambda, TypeModel};

#[derive(Parser, Debug)]
#[command(name = "exprchain", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the access chain of a lambda, one link per line.
    Chain(ChainArgs),
    /// Fail unless the lambda is a member path.
    Check(CheckArgs),
    /// Print the lambda with a null-safe body.
    NullCheck(NullCheckArgs),
    /// Print `x => second(first(x))`.
    Concat(ConcatArgs),
}

#[derive(Args, Debug)]
struct ModelArg {
    /// Type model JSON. Only primitive types are known without it.
    #[arg(long)]
    model: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ChainArgs {
    #[command(flatten)]
    model: ModelArg,

    /// Lambda text, e.g. `p: Person => p.Address.City`.
    lambda: String,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    #[command(flatten)]
    model: ModelArg,

    /// Argument name reported on rejection.
    #[arg(long, default_value = "lambda")]
    name: String,

    lambda: String,
}

#[derive(Parser, Debug)]
struct NullCheckArgs {
    #[command(flatten)]
    model: ModelArg,

    /// Result type; defaults to the type of the lambda body.
    #[arg(long)]
    dest: Option<String>,

    lambda: String,
}

#[derive(Parser, Debug)]
struct ConcatArgs {
    #[command(flatten)]
    model: ModelArg,

    first: String,
    second: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Chain(args) => cmd_chain(args),
        Command::Check(args) => cmd_check(args),
        Command::NullCheck(args) => cmd_null_check(args),
        Command::Concat(args) => cmd_concat(args),
    }
}

fn load_model(arg: &ModelArg) -> anyhow::Result<Cow<'static, TypeModel>> {
    match &arg.model {
        None => Ok(Cow::Borrowed(TypeModel::shared())),
        Some(path) => Ok(Cow::Owned(read_model(path)?)),
    }
}

fn read_model(path: &Path) -> anyhow::Result<TypeModel> {
    TypeModel::from_path(path).with_context(|| format!("load type model '{}'", path.display()))
}

fn parse(src: &str, model: &TypeModel) -> anyhow::Result<Lambda> {
    exprchain::parse_lambda(src, model).with_context(|| format!("parse lambda `{src}`"))
}

fn cmd_chain(args: ChainArgs) -> anyhow::Result<()> {
    let model = load_model(&args.model)?;
    let lambda = parse(&args.lambda, &model)?;
    let links = exprchain::get_chain(lambda.body());
    match exprchain::chain_root(&links) {
        Some(root) => println!("root\t{root}\t{}", root.ty()),
        None => println!("root\t-"),
    }
    for link in &links {
        println!(
            "{}\t{}\t{}",
            link.member,
            link.expression,
            link.expression.ty()
        );
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let model = load_model(&args.model)?;
    let lambda = parse(&args.lambda, &model)?;
    exprchain::ensure_member_path(&lambda, &args.name)?;
    println!("ok");
    Ok(())
}

fn cmd_null_check(args: NullCheckArgs) -> anyhow::Result<()> {
    let model = load_model(&args.model)?;
    let lambda = parse(&args.lambda, &model)?;
    let dest = args
        .dest
        .as_deref()
        .map(|name| model.resolve_type(name))
        .transpose()
        .context("resolve --dest")?;
    let body = exprchain::null_check(lambda.body(), dest.as_ref());
    println!("{}", Lambda::new(lambda.params().to_vec(), body));
    Ok(())
}

fn cmd_concat(args: ConcatArgs) -> anyhow::Result<()> {
    let model = load_model(&args.model)?;
    let first = parse(&args.first, &model)?;
    let second = parse(&args.second, &model)?;
    println!("{}", exprchain::concat(&first, &second));
    Ok(())
}
