//! Android Room (Java) entity, DAO and repository generation

use log::debug;

use super::fields::{fields_for, FieldSpec};
use super::naming::{class_name, instance_name, table_name};
use super::profile::{LanguageProfile, ROOM_JAVA};
use super::{indent, Artifact, EmitContext, Emitter};
use crate::schema::{SchemaCollection, TableSchema};

pub const DEFAULT_PACKAGE: &str = "com.example.app";
pub const DEFAULT_DB_FILE: &str = "database.db";
pub const DEFAULT_DB_CLASS: &str = "AppDatabase";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomEmitter {
    /// Root Java package, e.g. `com.example.app`
    pub package: String,
    /// Name of the generated `RoomDatabase` subclass
    pub db_class: String,
    /// SQLite file name opened by the database class
    pub db_file: String,
    pub db_version: u32,
}

impl Default for RoomEmitter {
    fn default() -> Self {
        Self::new(DEFAULT_PACKAGE, DEFAULT_DB_CLASS, DEFAULT_DB_FILE)
    }
}

impl RoomEmitter {
    pub fn new(
        package: impl Into<String>,
        db_class: impl Into<String>,
        db_file: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            db_class: db_class.into(),
            db_file: db_file.into(),
            db_version: 1,
        }
    }

    pub fn with_version(self, db_version: u32) -> Self {
        Self { db_version, ..self }
    }

    fn entity(&self, table: &TableSchema, class: &str, ctx: &EmitContext) -> String {
        let fields = fields_for(table);
        let ind = ROOM_JAVA.indent;

        format!(
            r#"package {pkg}.data.entity;

import androidx.annotation.NonNull;
import androidx.room.ColumnInfo;
import androidx.room.Entity;
import androidx.room.Ignore;
import androidx.room.PrimaryKey;

import static {pkg}.data.entity.{class}.TABLE_NAME;

/**
 * Created on {date}.
 */
@Entity(tableName = TABLE_NAME)
public class {class} {{
    /**
     * The table name
     */
    @Ignore
    public static final String TABLE_NAME = "{table}";

{fields}

{constructor}

{accessors}
}}
"#,
            pkg = self.package,
            date = ctx.generated_at,
            table = table_name(&table.entity_name),
            fields = indent(&field_block(&fields), ind),
            constructor = indent(&constructor(class, &fields), ind),
            accessors = indent(&accessors(&fields), ind),
        )
    }

    fn dao(&self, table: &TableSchema, class: &str, ctx: &EmitContext) -> String {
        format!(
            r#"package {pkg}.data.dao;

import androidx.room.Dao;
import androidx.room.Insert;
import androidx.room.OnConflictStrategy;
import androidx.room.Query;

import {pkg}.data.entity.{class};

import java.util.List;

/**
 * Created on {date}.
 */
@Dao
public interface {class}Dao {{
    /**
     * insert a singular item
     */
    @Insert(onConflict = OnConflictStrategy.REPLACE)
    void insert({class} item);

    /**
     * insert multiple items
     */
    @Insert(onConflict = OnConflictStrategy.REPLACE)
    void insertAll({class}... items);

    /**
     * delete all rows
     */
    @Query("DELETE FROM {table}")
    void deleteAll();

    /**
     * @return all rows
     */
    @Query("SELECT * FROM {table}")
    List<{class}> getAll();
}}
"#,
            pkg = self.package,
            date = ctx.generated_at,
            table = table_name(&table.entity_name),
        )
    }

    fn repository(&self, class: &str, ctx: &EmitContext) -> String {
        format!(
            r#"package {pkg}.data.repository;

import android.content.Context;
import android.os.AsyncTask;

import {pkg}.data.DataAccessListener;
import {pkg}.data.{db};
import {pkg}.data.dao.{class}Dao;
import {pkg}.data.entity.{class};

import java.util.ArrayList;
import java.util.List;

/**
 * Created on {date}.
 */
public class {class}Repository extends BaseRepository {{
    private {db} db;
    private static {class}Repository thisInstance;

    /**
     * Initialise the repository against the shared database
     *
     * @param context a {{@link Context}} instance to interact with the data
     */
    private {class}Repository(Context context) {{
        db = {db}.getDatabase(context);
    }}

    public static synchronized {class}Repository getInstance(Context context) {{
        if (thisInstance == null)
            thisInstance = new {class}Repository(context);
        return thisInstance;
    }}

    /**
     * Asynchronously insert an entity into the local database
     *
     * @param entity the entity to insert
     */
    public void insert({class} entity) {{
        new Save{class}sAsync(db).execute(entity);
    }}

    /**
     * Asynchronously insert several entities into the local database
     *
     * @param entities the entities to insert
     */
    public void insert({class}[] entities) {{
        new Save{class}sAsync(db).execute(entities);
    }}

    public void save{class}s(List<{class}> entities) {{
        if (entities != null) {{
            {class}[] items = new {class}[entities.size()];
            items = entities.toArray(items);
            new Save{class}sAsync(db).execute(items);
        }}
    }}

    /**
     * Load every {{@link {class}}} and notify the listener when the data is available
     */
    public void load{class}s() {{
        Get{class}sAsync task = new Get{class}sAsync(db, mDataAccessListener);
        task.execute();
    }}

    private static class Save{class}sAsync extends AsyncTask<{class}, Integer, Integer> {{
        private final {class}Dao m{class}Dao;

        Save{class}sAsync({db} db) {{
            m{class}Dao = db.{instance}Dao();
        }}

        @Override
        protected Integer doInBackground(final {class}... params) {{
            m{class}Dao.insertAll(params);
            return 0;
        }}
    }}

    private static class Get{class}sAsync extends AsyncTask<Void, Integer, ArrayList<{class}>> {{
        private final {class}Dao m{class}Dao;
        private final DataAccessListener mDataAccessListener;
        private int requestCode = 0;

        Get{class}sAsync({db} db, DataAccessListener listener) {{
            m{class}Dao = db.{instance}Dao();
            mDataAccessListener = listener;
        }}

        @Override
        protected ArrayList<{class}> doInBackground(final Void... params) {{
            return new ArrayList<>(m{class}Dao.getAll());
        }}

        @Override
        protected void onPostExecute(ArrayList<{class}> entities) {{
            super.onPostExecute(entities);
            if (entities != null && mDataAccessListener != null) {{
                {class}[] entitiesArray = new {class}[entities.size()];
                entitiesArray = entities.toArray(entitiesArray);
                if (requestCode == 0)
                    mDataAccessListener.onDataLoaded(entitiesArray);
                else mDataAccessListener.onDataRequestCompleted(requestCode, entitiesArray);
            }}
        }}
    }}
}}
"#,
            pkg = self.package,
            db = self.db_class,
            date = ctx.generated_at,
            instance = instance_name(class),
        )
    }

    fn database(&self, tables: &SchemaCollection, ctx: &EmitContext) -> String {
        let classes: Vec<String> = tables
            .iter()
            .map(|t| class_name(&t.entity_name))
            .collect();

        let entities = classes
            .iter()
            .map(|c| format!("{}.class", c))
            .collect::<Vec<_>>()
            .join(", ");

        let daos = classes
            .iter()
            .map(|c| format!("public abstract {}Dao {}Dao();", c, instance_name(c)))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            r#"package {pkg}.data;

import android.content.Context;

import androidx.annotation.NonNull;
import androidx.room.Database;
import androidx.room.Room;
import androidx.room.RoomDatabase;
import androidx.sqlite.db.SupportSQLiteDatabase;

import {pkg}.BuildConfig;
import {pkg}.data.dao.*;
import {pkg}.data.entity.*;

/**
 * Created on {date}.
 */
@Database(entities = {{{entities}}}, version = {version})
public abstract class {db} extends RoomDatabase {{
    /**
     * The database file name
     */
    public static final String DATABASE_NAME = "{file}";

{daos}

    private static volatile {db} INSTANCE;

    public static {db} getDatabase(final Context context) {{
        if (INSTANCE == null) {{
            synchronized ({db}.class) {{
                if (INSTANCE == null) {{
                    // Debug builds skip write-ahead logging so the sqlite file can be inspected directly
                    if (!BuildConfig.DEBUG)
                        INSTANCE = Room.databaseBuilder(context.getApplicationContext(),
                                {db}.class, DATABASE_NAME)
                                .addCallback(sRoomDatabaseCallback)
                                .build();
                    else INSTANCE = Room.databaseBuilder(context.getApplicationContext(),
                            {db}.class, DATABASE_NAME)
                            .addCallback(sRoomDatabaseCallback)
                            .setJournalMode(JournalMode.TRUNCATE)
                            .build();
                }}
            }}
        }}
        return INSTANCE;
    }}

    private static RoomDatabase.Callback sRoomDatabaseCallback =
            new RoomDatabase.Callback() {{
                @Override
                public void onOpen(@NonNull SupportSQLiteDatabase db) {{
                    super.onOpen(db);
                }}
            }};
}}
"#,
            pkg = self.package,
            date = ctx.generated_at,
            version = self.db_version,
            db = self.db_class,
            file = self.db_file,
            daos = indent(&daos, ROOM_JAVA.indent),
        )
    }

    fn base_repository(&self, ctx: &EmitContext) -> String {
        format!(
            r#"package {pkg}.data.repository;

import androidx.annotation.Nullable;

import {pkg}.data.DataAccessListener;

/**
 * Created on {date}.
 */
public class BaseRepository {{
    /**
     * Whether an observer is waiting for the result of a data request
     */
    boolean hasPendingDataRequest = false;

    /**
     * Listener notified about data access results
     */
    DataAccessListener mDataAccessListener = null;

    @Nullable
    public DataAccessListener getDataAccessListener() {{
        return mDataAccessListener;
    }}

    public void setDataAccessListener(@Nullable DataAccessListener listener) {{
        this.mDataAccessListener = listener;
    }}
}}
"#,
            pkg = self.package,
            date = ctx.generated_at,
        )
    }

    fn data_access_listener(&self, ctx: &EmitContext) -> String {
        format!(
            r#"package {pkg}.data;

/**
 * Created on {date}.
 */
public interface DataAccessListener {{
    /**
     * Called with the results of a completed query
     *
     * @param results the results returned
     */
    void onDataLoaded(Object[] results);

    /**
     * Called when a save has completed
     */
    void onDataSaved();

    /**
     * Called when a save started by a specific request has completed
     *
     * @param requestCode the request that initiated this action
     */
    default void onDataSaved(int requestCode) {{
    }}

    /**
     * Called with the results of a query started by a specific request
     *
     * @param requestCode the code to use to differentiate results
     * @param results     the results returned
     */
    void onDataRequestCompleted(int requestCode, Object[] results);
}}
"#,
            pkg = self.package,
            date = ctx.generated_at,
        )
    }
}

impl Emitter for RoomEmitter {
    fn profile(&self) -> &'static LanguageProfile {
        &ROOM_JAVA
    }

    fn emit_table(&self, table: &TableSchema, ctx: &EmitContext) -> Vec<Artifact> {
        let class = class_name(&table.entity_name);
        debug!("Rendering Room classes for {} as {}", table.entity_name, class);

        vec![
            Artifact::new(
                format!("data/entity/{}.java", class),
                self.entity(table, &class, ctx),
            ),
            Artifact::new(
                format!("data/dao/{}Dao.java", class),
                self.dao(table, &class, ctx),
            ),
            Artifact::new(
                format!("data/repository/{}Repository.java", class),
                self.repository(&class, ctx),
            ),
        ]
    }

    fn emit_shared(&self, tables: &SchemaCollection, ctx: &EmitContext) -> Vec<Artifact> {
        vec![
            Artifact::new(
                format!("data/{}.java", self.db_class),
                self.database(tables, ctx),
            ),
            Artifact::new(
                "data/repository/BaseRepository.java",
                self.base_repository(ctx),
            ),
            Artifact::new("data/DataAccessListener.java", self.data_access_listener(ctx)),
        ]
    }
}

fn field_block(fields: &[FieldSpec<'_>]) -> String {
    fields
        .iter()
        .map(|f| f.declaration_lines(&ROOM_JAVA).join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Constructor taking every field except the primary key
fn constructor(class: &str, fields: &[FieldSpec<'_>]) -> String {
    let fields: Vec<_> = fields.iter().filter(|f| !f.is_primary_key()).collect();

    let params = fields
        .iter()
        .map(|f| {
            let not_null = f
                .not_null_annotation(&ROOM_JAVA)
                .map(|a| format!("{} ", a))
                .unwrap_or_default();
            format!("{}{} {}", not_null, f.type_name(&ROOM_JAVA), f.name)
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = format!("public {}({}) {{\n", class, params);
    for f in &fields {
        out.push_str(&format!("    this.{0} = {0};\n", f.name));
    }
    out.push('}');
    out
}

fn accessors(fields: &[FieldSpec<'_>]) -> String {
    fields
        .iter()
        .map(|f| {
            let ty = f.type_name(&ROOM_JAVA);
            let not_null = f.not_null_annotation(&ROOM_JAVA);
            let param_note = not_null.map(|a| format!("{} ", a)).unwrap_or_default();
            let getter_note = not_null.map(|a| format!("{}\n", a)).unwrap_or_default();

            format!(
                "public void set{acc}({param_note}{ty} {name}) {{\n    this.{name} = {name};\n}}\n\n\
                 {getter_note}public {ty} get{acc}() {{\n    return this.{name};\n}}",
                acc = f.accessor,
                name = f.name,
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
