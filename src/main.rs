use {
    anyhow::Context,
    clap::{ArgAction, Parser},
    iam_policy_gen::{ActionCatalog, ServiceKind, ServiceOptions, TemplateCatalog},
    std::str::FromStr,
};

#[derive(Parser)]
#[command(name = "iam-policy-gen")]
#[command(version, about = "Generate AWS IAM policies for S3 buckets and ECR repositories", long_about = None)]
struct Cli {
    /// AWS service to generate a policy for (s3, ecr); case-insensitive
    #[arg(short, long)]
    service: String,

    /// S3 bucket name
    #[arg(short, long)]
    bucket: Option<String>,

    /// Permissions: binary flags for S3 (list, read, write; e.g. 111) or a comma-separated action list
    #[arg(short, long)]
    permission: Option<String>,

    /// Named action template (e.g. generic for ECR); overrides --permission
    #[arg(short, long)]
    template: Option<String>,

    /// Comma-separated ECR repository names
    #[arg(short, long)]
    repositories: Option<String>,

    /// AWS region of the ECR repositories
    #[arg(long)]
    region: Option<String>,

    /// AWS account ID owning the ECR repositories
    #[arg(long)]
    account_id: Option<String>,

    /// AWS partition for the generated ARNs
    #[arg(long, default_value = ServiceOptions::DEFAULT_PARTITION)]
    partition: String,

    /// Print the actions known for the service and exit
    #[arg(long)]
    list_actions: bool,

    /// Print the templates known for the service and exit
    #[arg(long)]
    list_templates: bool,

    /// Sets the level of verbosity
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> ServiceOptions {
        [
            (ServiceOptions::BUCKET, &self.bucket),
            (ServiceOptions::PERMISSION, &self.permission),
            (ServiceOptions::TEMPLATE, &self.template),
            (ServiceOptions::REPOSITORIES, &self.repositories),
            (ServiceOptions::REGION, &self.region),
            (ServiceOptions::ACCOUNT_ID, &self.account_id),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.as_ref().map(|value| (name, value.as_str())))
        .chain([(ServiceOptions::PARTITION, self.partition.as_str())])
        .collect()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env().filter_level(log_level).format_timestamp(None).init();

    let service = ServiceKind::from_str(&cli.service)?;
    let actions = ActionCatalog::builtin();
    let templates = TemplateCatalog::builtin();

    if cli.list_actions || cli.list_templates {
        if cli.list_actions {
            for action in actions.actions(service.namespace()).into_iter().flatten() {
                println!("{action}");
            }
        }
        if cli.list_templates {
            for name in templates.names(service.namespace()) {
                let contents = templates.lookup(service.namespace(), name)?;
                println!("{name}: {}", contents.join(","));
            }
        }
        return Ok(());
    }

    let mut adapter = service.adapter(actions, templates);
    adapter.set_options(&cli.options()).with_context(|| format!("invalid options for {service}"))?;
    adapter.execute().with_context(|| format!("failed to generate {service} policy"))?;
    Ok(())
}
