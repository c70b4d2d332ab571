//! Parameter names, grouped by the scope they can be set at.

use crate::enums::ParseEnumError;

use super::values::{EnumKind, ParameterKind};

/// A parameter name with a known value type.
pub trait ParameterName: Copy {
    /// The SQL name of the parameter.
    fn name(&self) -> &'static str;

    /// The value type the parameter accepts.
    fn kind(&self) -> ParameterKind;
}

macro_rules! parameter_name {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl ParameterName for $ty {
                fn name(&self) -> &'static str {
                    self.as_sql()
                }

                fn kind(&self) -> ParameterKind {
                    <$ty>::kind(*self)
                }
            }
        )+
    };
}

sql_enum! {
    /// Parameters that can be set for a session, and by default on users and the account.
    pub enum SessionParameter {
        AbortDetachedQuery => "ABORT_DETACHED_QUERY",
        Autocommit => "AUTOCOMMIT",
        BinaryInputFormat => "BINARY_INPUT_FORMAT",
        BinaryOutputFormat => "BINARY_OUTPUT_FORMAT",
        ClientEnableLogInfoStatementParameters => "CLIENT_ENABLE_LOG_INFO_STATEMENT_PARAMETERS",
        ClientMemoryLimit => "CLIENT_MEMORY_LIMIT",
        ClientMetadataRequestUseConnectionCtx => "CLIENT_METADATA_REQUEST_USE_CONNECTION_CTX",
        ClientPrefetchThreads => "CLIENT_PREFETCH_THREADS",
        ClientResultChunkSize => "CLIENT_RESULT_CHUNK_SIZE",
        ClientResultColumnCaseInsensitive => "CLIENT_RESULT_COLUMN_CASE_INSENSITIVE",
        ClientSessionKeepAlive => "CLIENT_SESSION_KEEP_ALIVE",
        ClientSessionKeepAliveHeartbeatFrequency => "CLIENT_SESSION_KEEP_ALIVE_HEARTBEAT_FREQUENCY",
        ClientTimestampTypeMapping => "CLIENT_TIMESTAMP_TYPE_MAPPING",
        DateInputFormat => "DATE_INPUT_FORMAT",
        DateOutputFormat => "DATE_OUTPUT_FORMAT",
        EnableUnloadPhysicalTypeOptimization => "ENABLE_UNLOAD_PHYSICAL_TYPE_OPTIMIZATION",
        ErrorOnNondeterministicMerge => "ERROR_ON_NONDETERMINISTIC_MERGE",
        ErrorOnNondeterministicUpdate => "ERROR_ON_NONDETERMINISTIC_UPDATE",
        GeographyOutputFormat => "GEOGRAPHY_OUTPUT_FORMAT",
        GeometryOutputFormat => "GEOMETRY_OUTPUT_FORMAT",
        HybridTableLockTimeout => "HYBRID_TABLE_LOCK_TIMEOUT",
        JdbcTreatDecimalAsInt => "JDBC_TREAT_DECIMAL_AS_INT",
        JdbcUseSessionTimezone => "JDBC_USE_SESSION_TIMEZONE",
        JsonIndent => "JSON_INDENT",
        LockTimeout => "LOCK_TIMEOUT",
        LogLevel => "LOG_LEVEL",
        MultiStatementCount => "MULTI_STATEMENT_COUNT",
        NoorderSequenceAsDefault => "NOORDER_SEQUENCE_AS_DEFAULT",
        OdbcTreatDecimalAsInt => "ODBC_TREAT_DECIMAL_AS_INT",
        QueryTag => "QUERY_TAG",
        QuotedIdentifiersIgnoreCase => "QUOTED_IDENTIFIERS_IGNORE_CASE",
        RowsPerResultset => "ROWS_PER_RESULTSET",
        S3StageVpceDnsName => "S3_STAGE_VPCE_DNS_NAME",
        SearchPath => "SEARCH_PATH",
        SimulatedDataSharingConsumer => "SIMULATED_DATA_SHARING_CONSUMER",
        StatementQueuedTimeoutInSeconds => "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS",
        StatementTimeoutInSeconds => "STATEMENT_TIMEOUT_IN_SECONDS",
        StrictJsonOutput => "STRICT_JSON_OUTPUT",
        TimeInputFormat => "TIME_INPUT_FORMAT",
        TimeOutputFormat => "TIME_OUTPUT_FORMAT",
        TimestampDayIsAlways24h => "TIMESTAMP_DAY_IS_ALWAYS_24H",
        TimestampInputFormat => "TIMESTAMP_INPUT_FORMAT",
        TimestampLtzOutputFormat => "TIMESTAMP_LTZ_OUTPUT_FORMAT",
        TimestampNtzOutputFormat => "TIMESTAMP_NTZ_OUTPUT_FORMAT",
        TimestampOutputFormat => "TIMESTAMP_OUTPUT_FORMAT",
        TimestampTypeMapping => "TIMESTAMP_TYPE_MAPPING",
        TimestampTzOutputFormat => "TIMESTAMP_TZ_OUTPUT_FORMAT",
        Timezone => "TIMEZONE",
        TraceLevel => "TRACE_LEVEL",
        TransactionAbortOnError => "TRANSACTION_ABORT_ON_ERROR",
        TransactionDefaultIsolationLevel => "TRANSACTION_DEFAULT_ISOLATION_LEVEL",
        TwoDigitCenturyStart => "TWO_DIGIT_CENTURY_START",
        UnsupportedDdlAction => "UNSUPPORTED_DDL_ACTION",
        UseCachedResult => "USE_CACHED_RESULT",
        WeekOfYearPolicy => "WEEK_OF_YEAR_POLICY",
        WeekStart => "WEEK_START",
    }
}

impl SessionParameter {
    /// The value type of the parameter.
    #[must_use]
    pub const fn kind(self) -> ParameterKind {
        match self {
            Self::AbortDetachedQuery
            | Self::Autocommit
            | Self::ClientEnableLogInfoStatementParameters
            | Self::ClientMetadataRequestUseConnectionCtx
            | Self::ClientResultColumnCaseInsensitive
            | Self::ClientSessionKeepAlive
            | Self::EnableUnloadPhysicalTypeOptimization
            | Self::ErrorOnNondeterministicMerge
            | Self::ErrorOnNondeterministicUpdate
            | Self::JdbcTreatDecimalAsInt
            | Self::JdbcUseSessionTimezone
            | Self::NoorderSequenceAsDefault
            | Self::OdbcTreatDecimalAsInt
            | Self::QuotedIdentifiersIgnoreCase
            | Self::StrictJsonOutput
            | Self::TimestampDayIsAlways24h
            | Self::TransactionAbortOnError
            | Self::UseCachedResult => ParameterKind::Bool,
            Self::ClientMemoryLimit
            | Self::ClientPrefetchThreads
            | Self::ClientResultChunkSize
            | Self::ClientSessionKeepAliveHeartbeatFrequency
            | Self::HybridTableLockTimeout
            | Self::JsonIndent
            | Self::LockTimeout
            | Self::MultiStatementCount
            | Self::RowsPerResultset
            | Self::StatementQueuedTimeoutInSeconds
            | Self::StatementTimeoutInSeconds
            | Self::TwoDigitCenturyStart
            | Self::WeekOfYearPolicy
            | Self::WeekStart => ParameterKind::Int,
            Self::BinaryInputFormat => ParameterKind::Enum(EnumKind::BinaryInputFormat),
            Self::BinaryOutputFormat => ParameterKind::Enum(EnumKind::BinaryOutputFormat),
            Self::ClientTimestampTypeMapping => {
                ParameterKind::Enum(EnumKind::ClientTimestampTypeMapping)
            }
            Self::GeographyOutputFormat | Self::GeometryOutputFormat => {
                ParameterKind::Enum(EnumKind::GeographyOutputFormat)
            }
            Self::LogLevel => ParameterKind::Enum(EnumKind::LogLevel),
            Self::TimestampTypeMapping => ParameterKind::Enum(EnumKind::TimestampTypeMapping),
            Self::TraceLevel => ParameterKind::Enum(EnumKind::TraceLevel),
            Self::TransactionDefaultIsolationLevel => {
                ParameterKind::Enum(EnumKind::TransactionDefaultIsolationLevel)
            }
            Self::UnsupportedDdlAction => ParameterKind::Enum(EnumKind::UnsupportedDdlAction),
            Self::DateInputFormat
            | Self::DateOutputFormat
            | Self::QueryTag
            | Self::S3StageVpceDnsName
            | Self::SearchPath
            | Self::SimulatedDataSharingConsumer
            | Self::TimeInputFormat
            | Self::TimeOutputFormat
            | Self::TimestampInputFormat
            | Self::TimestampLtzOutputFormat
            | Self::TimestampNtzOutputFormat
            | Self::TimestampOutputFormat
            | Self::TimestampTzOutputFormat
            | Self::Timezone => ParameterKind::Text,
        }
    }
}

sql_enum! {
    /// Parameters that can be set on the account.
    ///
    /// Includes account-only parameters, object parameters whose account value
    /// is the default for new objects, and every [`SessionParameter`].
    pub enum AccountParameter {
        // Account only.
        AllowClientMfaCaching => "ALLOW_CLIENT_MFA_CACHING",
        AllowIdToken => "ALLOW_ID_TOKEN",
        ClientEncryptionKeySize => "CLIENT_ENCRYPTION_KEY_SIZE",
        EnableIdentifierFirstLogin => "ENABLE_IDENTIFIER_FIRST_LOGIN",
        EnableInternalStagesPrivatelink => "ENABLE_INTERNAL_STAGES_PRIVATELINK",
        EnableTriSecretAndRekeyOptOutForImageRepository => "ENABLE_TRI_SECRET_AND_REKEY_OPT_OUT_FOR_IMAGE_REPOSITORY",
        EnforceNetworkRulesForInternalStages => "ENFORCE_NETWORK_RULES_FOR_INTERNAL_STAGES",
        ExternalOauthAddPrivilegedRolesToBlockedList => "EXTERNAL_OAUTH_ADD_PRIVILEGED_ROLES_TO_BLOCKED_LIST",
        InitialReplicationSizeLimitInTb => "INITIAL_REPLICATION_SIZE_LIMIT_IN_TB",
        MinDataRetentionTimeInDays => "MIN_DATA_RETENTION_TIME_IN_DAYS",
        NetworkPolicy => "NETWORK_POLICY",
        OauthAddPrivilegedRolesToBlockedList => "OAUTH_ADD_PRIVILEGED_ROLES_TO_BLOCKED_LIST",
        PeriodicDataRekeying => "PERIODIC_DATA_REKEYING",
        PreventLoadFromInlineUrl => "PREVENT_LOAD_FROM_INLINE_URL",
        PreventUnloadToInlineUrl => "PREVENT_UNLOAD_TO_INLINE_URL",
        RequireStorageIntegrationForStageCreation => "REQUIRE_STORAGE_INTEGRATION_FOR_STAGE_CREATION",
        RequireStorageIntegrationForStageOperation => "REQUIRE_STORAGE_INTEGRATION_FOR_STAGE_OPERATION",
        SsoLoginPage => "SSO_LOGIN_PAGE",
        // Object defaults.
        Catalog => "CATALOG",
        DataRetentionTimeInDays => "DATA_RETENTION_TIME_IN_DAYS",
        DefaultDdlCollation => "DEFAULT_DDL_COLLATION",
        EnableConsoleOutput => "ENABLE_CONSOLE_OUTPUT",
        ExternalVolume => "EXTERNAL_VOLUME",
        MaxConcurrencyLevel => "MAX_CONCURRENCY_LEVEL",
        MaxDataExtensionTimeInDays => "MAX_DATA_EXTENSION_TIME_IN_DAYS",
        PipeExecutionPaused => "PIPE_EXECUTION_PAUSED",
        PreventUnloadToInternalStages => "PREVENT_UNLOAD_TO_INTERNAL_STAGES",
        ReplaceInvalidCharacters => "REPLACE_INVALID_CHARACTERS",
        StorageSerializationPolicy => "STORAGE_SERIALIZATION_POLICY",
        SuspendTaskAfterNumFailures => "SUSPEND_TASK_AFTER_NUM_FAILURES",
        TaskAutoRetryAttempts => "TASK_AUTO_RETRY_ATTEMPTS",
        UserTaskManagedInitialWarehouseSize => "USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE",
        UserTaskMinimumTriggerIntervalInSeconds => "USER_TASK_MINIMUM_TRIGGER_INTERVAL_IN_SECONDS",
        UserTaskTimeoutMs => "USER_TASK_TIMEOUT_MS",
        // Session.
        AbortDetachedQuery => "ABORT_DETACHED_QUERY",
        Autocommit => "AUTOCOMMIT",
        BinaryInputFormat => "BINARY_INPUT_FORMAT",
        BinaryOutputFormat => "BINARY_OUTPUT_FORMAT",
        ClientEnableLogInfoStatementParameters => "CLIENT_ENABLE_LOG_INFO_STATEMENT_PARAMETERS",
        ClientMemoryLimit => "CLIENT_MEMORY_LIMIT",
        ClientMetadataRequestUseConnectionCtx => "CLIENT_METADATA_REQUEST_USE_CONNECTION_CTX",
        ClientPrefetchThreads => "CLIENT_PREFETCH_THREADS",
        ClientResultChunkSize => "CLIENT_RESULT_CHUNK_SIZE",
        ClientResultColumnCaseInsensitive => "CLIENT_RESULT_COLUMN_CASE_INSENSITIVE",
        ClientSessionKeepAlive => "CLIENT_SESSION_KEEP_ALIVE",
        ClientSessionKeepAliveHeartbeatFrequency => "CLIENT_SESSION_KEEP_ALIVE_HEARTBEAT_FREQUENCY",
        ClientTimestampTypeMapping => "CLIENT_TIMESTAMP_TYPE_MAPPING",
        DateInputFormat => "DATE_INPUT_FORMAT",
        DateOutputFormat => "DATE_OUTPUT_FORMAT",
        EnableUnloadPhysicalTypeOptimization => "ENABLE_UNLOAD_PHYSICAL_TYPE_OPTIMIZATION",
        ErrorOnNondeterministicMerge => "ERROR_ON_NONDETERMINISTIC_MERGE",
        ErrorOnNondeterministicUpdate => "ERROR_ON_NONDETERMINISTIC_UPDATE",
        GeographyOutputFormat => "GEOGRAPHY_OUTPUT_FORMAT",
        GeometryOutputFormat => "GEOMETRY_OUTPUT_FORMAT",
        HybridTableLockTimeout => "HYBRID_TABLE_LOCK_TIMEOUT",
        JdbcTreatDecimalAsInt => "JDBC_TREAT_DECIMAL_AS_INT",
        JdbcUseSessionTimezone => "JDBC_USE_SESSION_TIMEZONE",
        JsonIndent => "JSON_INDENT",
        LockTimeout => "LOCK_TIMEOUT",
        LogLevel => "LOG_LEVEL",
        MultiStatementCount => "MULTI_STATEMENT_COUNT",
        NoorderSequenceAsDefault => "NOORDER_SEQUENCE_AS_DEFAULT",
        OdbcTreatDecimalAsInt => "ODBC_TREAT_DECIMAL_AS_INT",
        QueryTag => "QUERY_TAG",
        QuotedIdentifiersIgnoreCase => "QUOTED_IDENTIFIERS_IGNORE_CASE",
        RowsPerResultset => "ROWS_PER_RESULTSET",
        S3StageVpceDnsName => "S3_STAGE_VPCE_DNS_NAME",
        SearchPath => "SEARCH_PATH",
        SimulatedDataSharingConsumer => "SIMULATED_DATA_SHARING_CONSUMER",
        StatementQueuedTimeoutInSeconds => "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS",
        StatementTimeoutInSeconds => "STATEMENT_TIMEOUT_IN_SECONDS",
        StrictJsonOutput => "STRICT_JSON_OUTPUT",
        TimeInputFormat => "TIME_INPUT_FORMAT",
        TimeOutputFormat => "TIME_OUTPUT_FORMAT",
        TimestampDayIsAlways24h => "TIMESTAMP_DAY_IS_ALWAYS_24H",
        TimestampInputFormat => "TIMESTAMP_INPUT_FORMAT",
        TimestampLtzOutputFormat => "TIMESTAMP_LTZ_OUTPUT_FORMAT",
        TimestampNtzOutputFormat => "TIMESTAMP_NTZ_OUTPUT_FORMAT",
        TimestampOutputFormat => "TIMESTAMP_OUTPUT_FORMAT",
        TimestampTypeMapping => "TIMESTAMP_TYPE_MAPPING",
        TimestampTzOutputFormat => "TIMESTAMP_TZ_OUTPUT_FORMAT",
        Timezone => "TIMEZONE",
        TraceLevel => "TRACE_LEVEL",
        TransactionAbortOnError => "TRANSACTION_ABORT_ON_ERROR",
        TransactionDefaultIsolationLevel => "TRANSACTION_DEFAULT_ISOLATION_LEVEL",
        TwoDigitCenturyStart => "TWO_DIGIT_CENTURY_START",
        UnsupportedDdlAction => "UNSUPPORTED_DDL_ACTION",
        UseCachedResult => "USE_CACHED_RESULT",
        WeekOfYearPolicy => "WEEK_OF_YEAR_POLICY",
        WeekStart => "WEEK_START",
    }
}

impl AccountParameter {
    /// The value type of the parameter.
    #[must_use]
    pub fn kind(self) -> ParameterKind {
        if let Ok(session) = SessionParameter::try_from(self) {
            return session.kind();
        }
        if let Ok(object) = self.as_sql().parse::<ObjectParameter>() {
            return object.kind();
        }
        match self {
            Self::ClientEncryptionKeySize | Self::MinDataRetentionTimeInDays => ParameterKind::Int,
            Self::InitialReplicationSizeLimitInTb | Self::NetworkPolicy => ParameterKind::Text,
            _ => ParameterKind::Bool,
        }
    }

    /// Returns whether the name is also a session parameter.
    #[must_use]
    pub fn is_session_parameter(self) -> bool {
        SessionParameter::try_from(self).is_ok()
    }
}

impl TryFrom<AccountParameter> for SessionParameter {
    type Error = ParseEnumError;

    fn try_from(parameter: AccountParameter) -> Result<Self, Self::Error> {
        parameter.as_sql().parse()
    }
}

sql_enum! {
    /// Object kinds that carry parameters.
    pub enum ObjectType {
        Database => "DATABASE",
        Schema => "SCHEMA",
        Table => "TABLE",
        Warehouse => "WAREHOUSE",
        Task => "TASK",
        Pipe => "PIPE",
        User => "USER",
        Function => "FUNCTION",
        Procedure => "PROCEDURE",
    }
}

sql_enum! {
    /// Parameters that can be set on individual objects.
    pub enum ObjectParameter {
        Catalog => "CATALOG",
        DataRetentionTimeInDays => "DATA_RETENTION_TIME_IN_DAYS",
        DefaultDdlCollation => "DEFAULT_DDL_COLLATION",
        EnableConsoleOutput => "ENABLE_CONSOLE_OUTPUT",
        EnableUnredactedQuerySyntaxError => "ENABLE_UNREDACTED_QUERY_SYNTAX_ERROR",
        ExternalVolume => "EXTERNAL_VOLUME",
        LogLevel => "LOG_LEVEL",
        MaxConcurrencyLevel => "MAX_CONCURRENCY_LEVEL",
        MaxDataExtensionTimeInDays => "MAX_DATA_EXTENSION_TIME_IN_DAYS",
        NetworkPolicy => "NETWORK_POLICY",
        PipeExecutionPaused => "PIPE_EXECUTION_PAUSED",
        PreventUnloadToInternalStages => "PREVENT_UNLOAD_TO_INTERNAL_STAGES",
        ReplaceInvalidCharacters => "REPLACE_INVALID_CHARACTERS",
        StatementQueuedTimeoutInSeconds => "STATEMENT_QUEUED_TIMEOUT_IN_SECONDS",
        StatementTimeoutInSeconds => "STATEMENT_TIMEOUT_IN_SECONDS",
        StorageSerializationPolicy => "STORAGE_SERIALIZATION_POLICY",
        SuspendTaskAfterNumFailures => "SUSPEND_TASK_AFTER_NUM_FAILURES",
        TaskAutoRetryAttempts => "TASK_AUTO_RETRY_ATTEMPTS",
        TraceLevel => "TRACE_LEVEL",
        UserTaskManagedInitialWarehouseSize => "USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE",
        UserTaskMinimumTriggerIntervalInSeconds => "USER_TASK_MINIMUM_TRIGGER_INTERVAL_IN_SECONDS",
        UserTaskTimeoutMs => "USER_TASK_TIMEOUT_MS",
    }
}

impl ObjectParameter {
    /// The value type of the parameter.
    #[must_use]
    pub const fn kind(self) -> ParameterKind {
        match self {
            Self::EnableConsoleOutput
            | Self::EnableUnredactedQuerySyntaxError
            | Self::PipeExecutionPaused
            | Self::PreventUnloadToInternalStages
            | Self::ReplaceInvalidCharacters => ParameterKind::Bool,
            Self::DataRetentionTimeInDays
            | Self::MaxConcurrencyLevel
            | Self::MaxDataExtensionTimeInDays
            | Self::StatementQueuedTimeoutInSeconds
            | Self::StatementTimeoutInSeconds
            | Self::SuspendTaskAfterNumFailures
            | Self::TaskAutoRetryAttempts
            | Self::UserTaskMinimumTriggerIntervalInSeconds
            | Self::UserTaskTimeoutMs => ParameterKind::Int,
            Self::LogLevel => ParameterKind::Enum(EnumKind::LogLevel),
            Self::TraceLevel => ParameterKind::Enum(EnumKind::TraceLevel),
            Self::UserTaskManagedInitialWarehouseSize => {
                ParameterKind::Enum(EnumKind::WarehouseSize)
            }
            Self::Catalog
            | Self::DefaultDdlCollation
            | Self::ExternalVolume
            | Self::NetworkPolicy
            | Self::StorageSerializationPolicy => ParameterKind::Text,
        }
    }

    /// The object kinds this parameter can be set on.
    #[must_use]
    pub const fn object_types(self) -> &'static [ObjectType] {
        use ObjectType::{Database, Function, Pipe, Procedure, Schema, Table, Task, User, Warehouse};

        match self {
            Self::Catalog
            | Self::ExternalVolume
            | Self::ReplaceInvalidCharacters
            | Self::StorageSerializationPolicy => &[Database, Schema],
            Self::DataRetentionTimeInDays
            | Self::DefaultDdlCollation
            | Self::MaxDataExtensionTimeInDays => &[Database, Schema, Table],
            Self::EnableConsoleOutput => &[Database, Schema, Function, Procedure],
            Self::LogLevel | Self::TraceLevel => &[Database, Schema, Function, Procedure, Task],
            Self::MaxConcurrencyLevel => &[Warehouse],
            Self::StatementQueuedTimeoutInSeconds | Self::StatementTimeoutInSeconds => {
                &[Warehouse, User]
            }
            Self::PipeExecutionPaused => &[Schema, Pipe],
            Self::EnableUnredactedQuerySyntaxError
            | Self::NetworkPolicy
            | Self::PreventUnloadToInternalStages => &[User],
            Self::SuspendTaskAfterNumFailures
            | Self::TaskAutoRetryAttempts
            | Self::UserTaskManagedInitialWarehouseSize
            | Self::UserTaskMinimumTriggerIntervalInSeconds
            | Self::UserTaskTimeoutMs => &[Database, Schema, Task],
        }
    }

    /// Returns whether the parameter can be set on objects of `object_type`.
    #[must_use]
    pub fn supports(self, object_type: ObjectType) -> bool {
        self.object_types().contains(&object_type)
    }
}

sql_enum! {
    /// Parameters that only apply to users.
    pub enum UserParameter {
        EnableUnredactedQuerySyntaxError => "ENABLE_UNREDACTED_QUERY_SYNTAX_ERROR",
        NetworkPolicy => "NETWORK_POLICY",
        PreventUnloadToInternalStages => "PREVENT_UNLOAD_TO_INTERNAL_STAGES",
    }
}

impl UserParameter {
    /// The value type of the parameter.
    #[must_use]
    pub const fn kind(self) -> ParameterKind {
        match self {
            Self::EnableUnredactedQuerySyntaxError | Self::PreventUnloadToInternalStages => {
                ParameterKind::Bool
            }
            Self::NetworkPolicy => ParameterKind::Text,
        }
    }
}

sql_enum! {
    /// Parameters that only apply to tasks.
    pub enum TaskParameter {
        SuspendTaskAfterNumFailures => "SUSPEND_TASK_AFTER_NUM_FAILURES",
        TaskAutoRetryAttempts => "TASK_AUTO_RETRY_ATTEMPTS",
        UserTaskManagedInitialWarehouseSize => "USER_TASK_MANAGED_INITIAL_WAREHOUSE_SIZE",
        UserTaskMinimumTriggerIntervalInSeconds => "USER_TASK_MINIMUM_TRIGGER_INTERVAL_IN_SECONDS",
        UserTaskTimeoutMs => "USER_TASK_TIMEOUT_MS",
    }
}

impl TaskParameter {
    /// The value type of the parameter.
    #[must_use]
    pub const fn kind(self) -> ParameterKind {
        match self {
            Self::UserTaskManagedInitialWarehouseSize => {
                ParameterKind::Enum(EnumKind::WarehouseSize)
            }
            Self::SuspendTaskAfterNumFailures
            | Self::TaskAutoRetryAttempts
            | Self::UserTaskMinimumTriggerIntervalInSeconds
            | Self::UserTaskTimeoutMs => ParameterKind::Int,
        }
    }
}

parameter_name!(
    SessionParameter,
    AccountParameter,
    ObjectParameter,
    UserParameter,
    TaskParameter,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_session_name_is_an_account_name() {
        for session in SessionParameter::ALL {
            let account: AccountParameter = session.as_sql().parse().unwrap();
            assert_eq!(account.as_sql(), session.as_sql());
            assert!(account.is_session_parameter());
            assert_eq!(account.kind(), session.kind());
        }
    }

    #[test]
    fn test_account_only_names_are_not_session_names() {
        assert!(!AccountParameter::AllowIdToken.is_session_parameter());
        assert!(SessionParameter::try_from(AccountParameter::Catalog).is_err());
    }

    #[test]
    fn test_account_kinds() {
        assert_eq!(AccountParameter::AllowIdToken.kind(), ParameterKind::Bool);
        assert_eq!(AccountParameter::ClientEncryptionKeySize.kind(), ParameterKind::Int);
        assert_eq!(AccountParameter::NetworkPolicy.kind(), ParameterKind::Text);
        assert_eq!(
            AccountParameter::DataRetentionTimeInDays.kind(),
            ParameterKind::Int
        );
        assert_eq!(
            AccountParameter::UserTaskManagedInitialWarehouseSize.kind(),
            ParameterKind::Enum(EnumKind::WarehouseSize)
        );
        assert_eq!(
            AccountParameter::LogLevel.kind(),
            ParameterKind::Enum(EnumKind::LogLevel)
        );
    }

    #[test]
    fn test_object_support() {
        assert!(ObjectParameter::DataRetentionTimeInDays.supports(ObjectType::Table));
        assert!(!ObjectParameter::DataRetentionTimeInDays.supports(ObjectType::Warehouse));
        assert!(ObjectParameter::MaxConcurrencyLevel.supports(ObjectType::Warehouse));
        assert!(ObjectParameter::LogLevel.supports(ObjectType::Procedure));
    }

    #[test]
    fn test_parameter_name_trait() {
        fn describe<P: ParameterName>(p: P) -> (&'static str, ParameterKind) {
            (p.name(), p.kind())
        }
        assert_eq!(
            describe(TaskParameter::UserTaskTimeoutMs),
            ("USER_TASK_TIMEOUT_MS", ParameterKind::Int)
        );
        assert_eq!(
            describe(UserParameter::NetworkPolicy),
            ("NETWORK_POLICY", ParameterKind::Text)
        );
    }
}
