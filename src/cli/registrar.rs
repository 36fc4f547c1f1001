//! Resource registrar - turns a resource description into CLI commands
//!
//! A [`Config`] describes one resource: its parent scopes, the attributes
//! exposed as flags, and a callback per supported operation. Registering it
//! yields a `<resource>` command with one subcommand per callback:
//!
//! - `list`: resolve parents, optional `--filter`, render the collection
//! - `get`: resolve parents, required `--id`, render the item
//! - `create`: resolve parents, bind every field flag, render the result
//! - `update`: resolve parents, required `--id`, bind only the flags given
//! - `delete`: resolve parents, required `--id`, print `<resource> deleted`
//!
//! Operations without a callback get no subcommand.

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::io::Write;
use thiserror::Error;

use crate::cli::output::{render, OutputFormat, Payload, RenderError};
use crate::core::client::{ApiClient, ApiError, ListOptions};
use crate::core::field::{
    populate_changed_fields, populate_fields, set_struct_field, BindError, FieldDef, FieldKind,
};
use crate::core::flags::FlagSource;
use crate::core::resource::Resource;
use crate::core::scope::{resolve_parents, ParentScope, ResolveError};

pub type ListFn<T> = Box<dyn Fn(&ApiClient, &[String], &ListOptions) -> Result<Vec<T>, ApiError>>;
pub type GetFn<T> = Box<dyn Fn(&ApiClient, &[String], &str) -> Result<T, ApiError>>;
pub type CreateFn<T> = Box<dyn Fn(&ApiClient, &[String], &T) -> Result<T, ApiError>>;
pub type UpdateFn<T> = Box<dyn Fn(&ApiClient, &[String], &T) -> Result<T, ApiError>>;
pub type DeleteFn = Box<dyn Fn(&ApiClient, &[String], &str) -> Result<(), ApiError>>;

/// Errors from running a resource command
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("could not write output")]
    Io(#[from] std::io::Error),

    #[error("{resource} has no '{subcommand}' command")]
    UnknownSubcommand {
        resource: String,
        subcommand: String,
    },
}

/// Per-invocation state handed to every command
pub struct Context<'a> {
    pub client: &'a ApiClient,
    pub output: OutputFormat,
}

/// A registered resource, with its type erased
pub trait ResourceCommand {
    /// Top-level command name
    fn name(&self) -> &str;

    /// Build the clap command tree for this resource
    fn command(&self) -> Command;

    /// Run the subcommand selected in `matches` (the resource-level matches)
    fn run(&self, matches: &ArgMatches, ctx: &Context<'_>, out: &mut dyn Write) -> Result<(), CommandError>;
}

/// Declarative description of one resource's commands
pub struct Config<T: Resource> {
    name: &'static str,
    about: &'static str,
    aliases: &'static [&'static str],
    scopes: Vec<ParentScope>,
    fields: &'static [FieldDef],
    list: Option<ListFn<T>>,
    get: Option<GetFn<T>>,
    create: Option<CreateFn<T>>,
    update: Option<UpdateFn<T>>,
    delete: Option<DeleteFn>,
}

impl<T: Resource> Config<T> {
    /// Start a description named after the resource, with no operations
    pub fn new(about: &'static str) -> Self {
        Self {
            name: T::NAME,
            about,
            aliases: &[],
            scopes: Vec::new(),
            fields: &[],
            list: None,
            get: None,
            create: None,
            update: None,
            delete: None,
        }
    }

    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Add a parent scope; scopes resolve in the order they are added
    pub fn scope(mut self, scope: ParentScope) -> Self {
        self.scopes.push(scope);
        self
    }

    pub fn fields(mut self, fields: &'static [FieldDef]) -> Self {
        self.fields = fields;
        self
    }

    pub fn list<F>(mut self, f: F) -> Self
    where
        F: Fn(&ApiClient, &[String], &ListOptions) -> Result<Vec<T>, ApiError> + 'static,
    {
        self.list = Some(Box::new(f));
        self
    }

    pub fn get<F>(mut self, f: F) -> Self
    where
        F: Fn(&ApiClient, &[String], &str) -> Result<T, ApiError> + 'static,
    {
        self.get = Some(Box::new(f));
        self
    }

    pub fn create<F>(mut self, f: F) -> Self
    where
        F: Fn(&ApiClient, &[String], &T) -> Result<T, ApiError> + 'static,
    {
        self.create = Some(Box::new(f));
        self
    }

    /// The callback receives the resource with its `id` stamped on
    pub fn update<F>(mut self, f: F) -> Self
    where
        F: Fn(&ApiClient, &[String], &T) -> Result<T, ApiError> + 'static,
    {
        self.update = Some(Box::new(f));
        self
    }

    pub fn delete<F>(mut self, f: F) -> Self
    where
        F: Fn(&ApiClient, &[String], &str) -> Result<(), ApiError> + 'static,
    {
        self.delete = Some(Box::new(f));
        self
    }

    pub fn field_defs(&self) -> &'static [FieldDef] {
        self.fields
    }

    pub fn scopes(&self) -> &[ParentScope] {
        &self.scopes
    }

    fn subcommand(&self, name: &'static str, about: String) -> Command {
        let mut cmd = Command::new(name).about(about);
        for scope in &self.scopes {
            cmd = cmd.args(scope_args(scope));
        }
        cmd
    }

    fn run_list(
        &self,
        list: &ListFn<T>,
        matches: &ArgMatches,
        ctx: &Context<'_>,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let parents = resolve_parents(ctx.client, matches, &self.scopes)?;
        let filter = matches.string("filter");
        let options = if filter.is_empty() {
            ListOptions::default()
        } else {
            ListOptions::filter(filter)
        };

        tracing::debug!(resource = self.name, ?parents, filter = ?options.filter, "listing");
        let items = list(ctx.client, &parents, &options)?;
        render(out, Payload::Many(&items), ctx.output)?;
        Ok(())
    }

    fn run_get(
        &self,
        get: &GetFn<T>,
        matches: &ArgMatches,
        ctx: &Context<'_>,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let parents = resolve_parents(ctx.client, matches, &self.scopes)?;
        let id = matches.string("id");

        tracing::debug!(resource = self.name, ?parents, id = %id, "getting");
        let item = get(ctx.client, &parents, &id)?;
        render(out, Payload::One(&item), ctx.output)?;
        Ok(())
    }

    fn run_create(
        &self,
        create: &CreateFn<T>,
        matches: &ArgMatches,
        ctx: &Context<'_>,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let parents = resolve_parents(ctx.client, matches, &self.scopes)?;
        let mut resource = T::default();
        populate_fields(matches, self.fields, &mut resource)?;

        tracing::debug!(resource = self.name, ?parents, "creating");
        let created = create(ctx.client, &parents, &resource)?;
        render(out, Payload::One(&created), ctx.output)?;
        Ok(())
    }

    fn run_update(
        &self,
        update: &UpdateFn<T>,
        matches: &ArgMatches,
        ctx: &Context<'_>,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let parents = resolve_parents(ctx.client, matches, &self.scopes)?;
        let id = matches.string("id");
        let mut resource = T::default();
        set_struct_field(&mut resource, "id", id.as_str())?;
        populate_changed_fields(matches, self.fields, &mut resource)?;

        tracing::debug!(resource = self.name, ?parents, id = %id, "updating");
        let updated = update(ctx.client, &parents, &resource)?;
        render(out, Payload::One(&updated), ctx.output)?;
        Ok(())
    }

    fn run_delete(
        &self,
        delete: &DeleteFn,
        matches: &ArgMatches,
        ctx: &Context<'_>,
        out: &mut dyn Write,
    ) -> Result<(), CommandError> {
        let parents = resolve_parents(ctx.client, matches, &self.scopes)?;
        let id = matches.string("id");

        tracing::debug!(resource = self.name, ?parents, id = %id, "deleting");
        delete(ctx.client, &parents, &id)?;
        writeln!(out, "{} deleted", self.name)?;
        Ok(())
    }
}

impl<T: Resource> ResourceCommand for Config<T> {
    fn name(&self) -> &str {
        self.name
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(self.name)
            .about(self.about)
            .visible_aliases(self.aliases.iter().copied())
            .subcommand_required(true)
            .arg_required_else_help(true);

        if self.list.is_some() {
            cmd = cmd.subcommand(
                self.subcommand("list", format!("List {}s", self.name)).arg(
                    Arg::new("filter")
                        .long("filter")
                        .value_name("EXPR")
                        .help("Filter expression, passed to the server as-is (e.g. \"name==prod\")"),
                ),
            );
        }
        if self.get.is_some() {
            cmd = cmd.subcommand(
                self.subcommand("get", format!("Show one {}", self.name))
                    .arg(id_arg(self.name)),
            );
        }
        if self.create.is_some() {
            cmd = cmd.subcommand(
                self.subcommand("create", format!("Create a {}", self.name))
                    .args(self.fields.iter().map(|def| field_arg(def, def.required))),
            );
        }
        if self.update.is_some() {
            cmd = cmd.subcommand(
                self.subcommand("update", format!("Update a {}", self.name))
                    .arg(id_arg(self.name))
                    .args(self.fields.iter().map(|def| field_arg(def, false))),
            );
        }
        if self.delete.is_some() {
            cmd = cmd.subcommand(
                self.subcommand("delete", format!("Delete a {}", self.name))
                    .arg(id_arg(self.name)),
            );
        }
        cmd
    }

    fn run(&self, matches: &ArgMatches, ctx: &Context<'_>, out: &mut dyn Write) -> Result<(), CommandError> {
        match matches.subcommand() {
            Some(("list", sub)) => match &self.list {
                Some(f) => self.run_list(f, sub, ctx, out),
                None => Err(self.unknown("list")),
            },
            Some(("get", sub)) => match &self.get {
                Some(f) => self.run_get(f, sub, ctx, out),
                None => Err(self.unknown("get")),
            },
            Some(("create", sub)) => match &self.create {
                Some(f) => self.run_create(f, sub, ctx, out),
                None => Err(self.unknown("create")),
            },
            Some(("update", sub)) => match &self.update {
                Some(f) => self.run_update(f, sub, ctx, out),
                None => Err(self.unknown("update")),
            },
            Some(("delete", sub)) => match &self.delete {
                Some(f) => self.run_delete(f, sub, ctx, out),
                None => Err(self.unknown("delete")),
            },
            Some((other, _)) => Err(self.unknown(other)),
            None => Err(self.unknown("")),
        }
    }
}

impl<T: Resource> Config<T> {
    fn unknown(&self, subcommand: &str) -> CommandError {
        CommandError::UnknownSubcommand {
            resource: self.name.to_string(),
            subcommand: subcommand.to_string(),
        }
    }
}

/// `--<scope>-id` and, when configured, `--<scope>-name`
fn scope_args(scope: &ParentScope) -> Vec<Arg> {
    let mut args = vec![Arg::new(scope.id_flag.clone())
        .long(scope.id_flag.clone())
        .value_name("ID")
        .help(format!("ID of the parent {}", scope.name))];
    if let Some(flag) = &scope.name_flag {
        args.push(
            Arg::new(flag.clone())
                .long(flag.clone())
                .value_name("NAME")
                .help(format!("Name of the parent {} (looked up when no ID is given)", scope.name)),
        );
    }
    args
}

/// Required `--id`; an explicitly empty value is accepted
fn id_arg(resource: &str) -> Arg {
    Arg::new("id")
        .long("id")
        .value_name("ID")
        .required(true)
        .help(format!("ID of the {}", resource))
}

/// Flag for one resource attribute
///
/// Bool flags accept `--flag`, `--flag=true` and `--flag=false`.
fn field_arg(def: &FieldDef, required: bool) -> Arg {
    let mut arg = Arg::new(def.flag)
        .long(def.flag)
        .help(def.description)
        .required(required);
    if let Some(short) = def.short {
        arg = arg.short(short);
    }
    match def.kind {
        FieldKind::String => arg.value_name("VALUE"),
        FieldKind::Bool => arg
            .action(ArgAction::Set)
            .value_parser(value_parser!(bool))
            .num_args(0..=1)
            .require_equals(true)
            .default_missing_value("true"),
        FieldKind::Int => arg
            .value_name("N")
            .value_parser(value_parser!(i64))
            .allow_negative_numbers(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::ApiResponse;
    use crate::core::scope::find_by_name;
    use crate::entities::Organization;
    use crate::testing::TestServer;
    use reqwest::Method;
    use serde_json::json;

    const FIELDS: &[FieldDef] = &[
        FieldDef::string("name", "name", "Organization name").required(),
        FieldDef::string("description", "description", "Description").short('d'),
        FieldDef::bool("disabled", "disabled", "Disable the organization"),
    ];

    fn organizations() -> Config<Organization> {
        Config::<Organization>::new("Manage organizations")
            .aliases(&["org"])
            .fields(FIELDS)
            .list(|client, _, options| client.list("/orgs", options))
            .get(|client, _, id| client.get(&format!("/orgs/{}", id)))
            .create(|client, _, org| client.create("/orgs", org))
            .update(|client, _, org| client.update(&format!("/orgs/{}", org.id), org))
            .delete(|client, _, id| client.delete(&format!("/orgs/{}", id)))
    }

    fn run(config: &Config<Organization>, server: &TestServer, args: &[&str]) -> Result<String, CommandError> {
        run_as(config, server, OutputFormat::Json, args)
    }

    fn run_as(
        config: &Config<Organization>,
        server: &TestServer,
        output: OutputFormat,
        args: &[&str],
    ) -> Result<String, CommandError> {
        let mut argv = vec!["organization"];
        argv.extend_from_slice(args);
        let matches = config.command().try_get_matches_from(argv).unwrap();
        let client = server.client();
        let ctx = Context {
            client: &client,
            output,
        };
        let mut out: Vec<u8> = Vec::new();
        config.run(&matches, &ctx, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_command_tree() {
        let cmd = organizations().command();
        let names: Vec<_> = cmd.get_subcommands().map(|c| c.get_name().to_string()).collect();
        assert_eq!(names, vec!["list", "get", "create", "update", "delete"]);
        assert!(cmd.get_visible_aliases().any(|a| a == "org"));
        cmd.debug_assert();
    }

    #[test]
    fn test_absent_callbacks_are_omitted() {
        let config = Config::<Organization>::new("Read-only organizations")
            .list(|client, _, options| client.list("/orgs", options));
        let cmd = config.command();

        let names: Vec<_> = cmd.get_subcommands().map(|c| c.get_name().to_string()).collect();
        assert_eq!(names, vec!["list"]);
        assert!(cmd.try_get_matches_from(["organization", "delete", "--id=x"]).is_err());
    }

    #[test]
    fn test_list_passes_filter() {
        let server = TestServer::new();
        server.respond_json(json!([{"id": "o-1", "name": "acme"}]));

        let out = run(&organizations(), &server, &["list", "--filter=name==acme"]).unwrap();

        assert!(out.contains("\"acme\""));
        assert_eq!(
            server.requests()[0].query,
            vec![("filter[organization]".to_string(), "name==acme".to_string())]
        );
    }

    #[test]
    fn test_list_without_filter_sends_no_query() {
        let server = TestServer::new();
        let out = run_as(&organizations(), &server, OutputFormat::Table, &["list"]).unwrap();

        assert!(out.is_empty());
        assert!(server.requests()[0].query.is_empty());
    }

    #[test]
    fn test_get_requires_id() {
        let err = organizations()
            .command()
            .try_get_matches_from(["organization", "get"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_create_requires_required_fields() {
        let err = organizations()
            .command()
            .try_get_matches_from(["organization", "create", "-d", "x"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_create_binds_every_field() {
        let server = TestServer::new();
        server.respond_json(json!({"id": "o-1", "name": "acme", "disabled": false}));

        run(&organizations(), &server, &["create", "--name=acme"]).unwrap();

        let request = &server.requests()[0];
        assert_eq!(request.method, Method::POST);
        // An absent bool flag binds as false, an absent string stays unset
        assert_eq!(request.body, Some(json!({"name": "acme", "disabled": false})));
    }

    #[test]
    fn test_update_binds_only_given_flags() {
        let server = TestServer::new();
        server.respond(ApiResponse::new(204, ""));

        let out = run(&organizations(), &server, &["update", "--id=o-1", "--disabled=false"]).unwrap();

        let request = &server.requests()[0];
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path, "/orgs/o-1");
        assert_eq!(request.body, Some(json!({"id": "o-1", "disabled": false})));
        assert!(out.contains("\"disabled\": false"));
    }

    #[test]
    fn test_update_does_not_require_required_fields() {
        let server = TestServer::new();
        server.respond(ApiResponse::new(204, ""));

        run(&organizations(), &server, &["update", "--id=o-1", "-d", "new"]).unwrap();

        assert_eq!(
            server.requests()[0].body,
            Some(json!({"id": "o-1", "description": "new"}))
        );
    }

    #[test]
    fn test_delete_prints_confirmation() {
        let server = TestServer::new();
        let out = run(&organizations(), &server, &["delete", "--id", "o-1"]).unwrap();

        assert_eq!(out, "organization deleted\n");
        let request = &server.requests()[0];
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.path, "/orgs/o-1");
    }

    #[test]
    fn test_delete_with_empty_id_still_calls_api() {
        let server = TestServer::new();
        let out = run(&organizations(), &server, &["delete", "--id="]).unwrap();

        assert_eq!(out, "organization deleted\n");
        assert_eq!(server.requests()[0].path, "/orgs/");
    }

    #[test]
    fn test_api_errors_pass_through() {
        let server = TestServer::new();
        server.respond(ApiResponse::new(403, "forbidden"));

        let err = run(&organizations(), &server, &["get", "--id=o-1"]).unwrap_err();

        assert!(matches!(err, CommandError::Api(ApiError::Status { status: 403, .. })));
        assert_eq!(err.to_string(), "GET /orgs/o-1 returned 403: forbidden");
    }

    #[test]
    fn test_bad_field_table_fails_before_any_call() {
        const BAD: &[FieldDef] = &[FieldDef::string("colour", "colour", "Colour")];
        let config = Config::<Organization>::new("Broken")
            .fields(BAD)
            .create(|client, _, org| client.create("/orgs", org));
        let server = TestServer::new();

        let err = run(&config, &server, &["create"]).unwrap_err();

        assert!(matches!(err, CommandError::Bind(BindError::UnknownField { .. })));
        assert!(server.requests().is_empty());
    }

    #[test]
    fn test_parent_flags_on_every_subcommand() {
        let config = organizations().scope(
            ParentScope::named("tenant", |client, _, name| {
                find_by_name::<Organization>(client, "/tenants", name)
            }),
        );
        let cmd = config.command();

        for sub in cmd.get_subcommands() {
            let flags: Vec<_> = sub.get_arguments().filter_map(|a| a.get_long()).collect();
            assert!(flags.contains(&"tenant-id"), "{} lacks --tenant-id", sub.get_name());
            assert!(flags.contains(&"tenant-name"), "{} lacks --tenant-name", sub.get_name());
        }
    }

    #[test]
    fn test_missing_parent_stops_before_operation() {
        let config = organizations().scope(ParentScope::new("tenant"));
        let server = TestServer::new();

        let err = run(&config, &server, &["list"]).unwrap_err();

        assert_eq!(err.to_string(), "--tenant-id is required");
        assert!(server.requests().is_empty());
    }
}
