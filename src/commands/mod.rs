pub mod csv_commands;
