//! Clap derive structures for the `campus` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// campus -- CLI for the campus student-management backend
#[derive(Debug, Parser)]
#[command(
    name = "campus",
    version,
    about = "Manage students, courses, and enrollments from the command line",
    long_about = "A command-line client for the campus student-management backend.\n\n\
        Sessions persist across invocations: sign in once with `campus login`,\n\
        then every command reuses the stored token until `campus logout`.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL, e.g. https://campus.example.edu
    #[arg(long, short = 's', env = "CAMPUS_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "CAMPUS_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "CAMPUS_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Plain text, one value per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the session
    Login(LoginArgs),

    /// Sign out and clear the stored session
    Logout,

    /// Create an account and sign in
    Register(RegisterArgs),

    /// Show the signed-in user
    Whoami,

    /// Show the signed-in user's roles and permissions
    Roles(RolesArgs),

    /// Run the navigation guard against an app path
    Open(OpenArgs),

    /// Manage student records
    #[command(alias = "st")]
    Student(StudentArgs),

    /// Manage courses
    #[command(alias = "co")]
    Course(CourseArgs),

    /// Enroll in and drop courses
    #[command(alias = "en")]
    Enroll(EnrollArgs),

    /// Send and read notification messages
    #[command(alias = "msg")]
    Message(MessageArgs),

    /// Look up dictionary data (classes, statuses, genders)
    Dict(DictArgs),

    /// Search students and courses
    Search(SearchArgs),

    /// Upload files and avatars
    Upload(UploadArgs),

    /// Smoke-test the notification WebSocket
    WsTest(WsTestArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Auth ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username (prompted interactively when omitted)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Password (prompted interactively when omitted; prefer the prompt)
    #[arg(long, env = "CAMPUS_PASSWORD", hide_env = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    #[arg(long, env = "CAMPUS_PASSWORD", hide_env = true)]
    pub password: Option<String>,

    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Optional phone number
    #[arg(long)]
    pub phone: Option<String>,
}

#[derive(Debug, Args)]
pub struct RolesArgs {
    /// Re-fetch roles and permissions from the backend first
    #[arg(long)]
    pub refresh: bool,
}

#[derive(Debug, Args)]
pub struct OpenArgs {
    /// App path to navigate to, e.g. /course/list
    pub path: String,
}

// ── Students ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StudentArgs {
    #[command(subcommand)]
    pub command: StudentCommand,
}

#[derive(Debug, Subcommand)]
pub enum StudentCommand {
    /// List students
    #[command(alias = "ls")]
    List {
        /// Page number (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Page size
        #[arg(long, default_value = "10")]
        size: u32,

        /// Filter by name or student id
        #[arg(long, short = 'k')]
        keyword: Option<String>,

        /// Filter by class id
        #[arg(long)]
        class: Option<i64>,

        /// Filter by status
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one student
    Get { id: i64 },

    /// Create a student record
    Create {
        #[arg(long)]
        student_id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        gender: String,

        #[arg(long)]
        class: Option<i64>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        major: Option<String>,

        #[arg(long)]
        admission_year: Option<i32>,
    },

    /// Update a student record (unset flags keep current values server-side)
    Update {
        id: i64,

        #[arg(long)]
        student_id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        gender: String,

        #[arg(long)]
        class: Option<i64>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        major: Option<String>,

        #[arg(long)]
        admission_year: Option<i32>,

        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a student record
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Delete several students at once
    BatchDelete {
        /// Student record ids
        #[arg(required = true)]
        ids: Vec<i64>,
    },
}

// ── Courses ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CourseArgs {
    #[command(subcommand)]
    pub command: CourseCommand,
}

#[derive(Debug, Subcommand)]
pub enum CourseCommand {
    /// List courses
    #[command(alias = "ls")]
    List {
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "10")]
        size: u32,

        #[arg(long, short = 'k')]
        keyword: Option<String>,

        #[arg(long)]
        status: Option<String>,

        #[arg(long)]
        semester: Option<String>,
    },

    /// Show one course with schedules and attachments
    Get { id: i64 },

    /// Create a course
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        capacity: i64,

        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        teacher: Option<i64>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        credits: Option<f64>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Update a course
    Update {
        id: i64,

        #[arg(long)]
        name: String,

        #[arg(long)]
        capacity: i64,

        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        teacher: Option<i64>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        credits: Option<f64>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        status: Option<String>,
    },

    /// Delete a course
    #[command(alias = "rm")]
    Delete { id: i64 },

    /// Add a weekly schedule slot
    AddSchedule {
        course_id: i64,

        /// Day of week: 1 = Monday ... 7 = Sunday
        #[arg(long)]
        day: u8,

        /// Start time, e.g. 08:00
        #[arg(long)]
        start: String,

        /// End time, e.g. 09:40
        #[arg(long)]
        end: String,

        #[arg(long)]
        location: Option<String>,
    },

    /// Remove a schedule slot
    DeleteSchedule { schedule_id: i64 },

    /// Attach an already-uploaded file to a course
    Attach {
        course_id: i64,

        #[arg(long)]
        file_name: String,

        #[arg(long)]
        file_url: String,
    },
}

// ── Enrollments ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EnrollArgs {
    #[command(subcommand)]
    pub command: EnrollCommand,
}

#[derive(Debug, Subcommand)]
pub enum EnrollCommand {
    /// Enroll in a course
    Add { course_id: i64 },

    /// Drop an enrollment
    Drop { enrollment_id: i64 },

    /// List my enrolled courses
    Mine {
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "10")]
        size: u32,
    },

    /// List courses open for enrollment
    Market {
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "10")]
        size: u32,
    },

    /// Full enrollment history, including dropped courses
    History,

    /// Currently active enrollments
    Active,
}

// ── Messages ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct MessageArgs {
    #[command(subcommand)]
    pub command: MessageCommand,
}

#[derive(Debug, Subcommand)]
pub enum MessageCommand {
    /// Send a message to a user
    Send {
        /// Receiver user id
        #[arg(long)]
        to: i64,

        /// Message text
        content: String,
    },

    /// List my messages
    #[command(alias = "ls")]
    List {
        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "10")]
        size: u32,

        /// Only unread messages
        #[arg(long)]
        unread: bool,
    },

    /// Mark a message as read
    Read { id: i64 },

    /// Show the unread message count
    Unread,
}

// ── Dictionaries ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DictArgs {
    #[command(subcommand)]
    pub command: DictCommand,
}

#[derive(Debug, Subcommand)]
pub enum DictCommand {
    /// List classes
    Classes,
    /// List student statuses
    Status,
    /// List gender labels
    Gender,
}

// ── Search ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub command: SearchCommand,
}

#[derive(Debug, Subcommand)]
pub enum SearchCommand {
    /// Search courses by keyword
    Courses {
        keyword: String,

        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "10")]
        size: u32,
    },

    /// Search students by keyword
    Students {
        keyword: String,

        #[arg(long, default_value = "1")]
        page: u32,

        #[arg(long, default_value = "10")]
        size: u32,
    },

    /// Search students and courses together
    Global { keyword: String },

    /// Show the most popular search keywords
    Popular {
        #[arg(long)]
        limit: Option<u32>,
    },
}

// ── Uploads ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct UploadArgs {
    #[command(subcommand)]
    pub command: UploadCommand,
}

#[derive(Debug, Subcommand)]
pub enum UploadCommand {
    /// Upload my avatar
    Avatar {
        /// Path to an image file
        file: std::path::PathBuf,
    },

    /// Upload a generic file
    File {
        file: std::path::PathBuf,

        /// Server-side directory hint
        #[arg(long)]
        dir: Option<String>,
    },

    /// Upload an avatar for a student record
    StudentAvatar {
        student_id: i64,

        file: std::path::PathBuf,
    },
}

// ── WebSocket smoke test ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WsTestArgs {
    /// Token to authenticate with (defaults to the stored session token)
    #[arg(long)]
    pub token: Option<String>,

    /// How long to listen for frames, in seconds
    #[arg(long, default_value = "5")]
    pub duration: u64,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
